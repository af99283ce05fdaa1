//! Numeric conversions from provider units to display units.
//!
//! Inputs are never validated for physical plausibility; NaN and negative
//! Kelvin values pass straight through.

const KELVIN_OFFSET: f64 = 273.15;
const BEAUFORT_FACTOR: f64 = 0.836;

/// Beaufort wind force for a speed in m/s: `ceil(cbrt((v / 0.836)^2))`.
///
/// The result is not clamped to 12; callers decide how to show anything above.
pub fn wind_ms_to_beaufort(speed_ms: f64) -> i32 {
    (speed_ms / BEAUFORT_FACTOR).powi(2).cbrt().ceil() as i32
}

/// Kelvin to whole degrees Celsius, rounding half away from zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - KELVIN_OFFSET).round() as i32
}

/// Kelvin to degrees Celsius with one decimal place.
pub fn kelvin_to_celsius_1dp(kelvin: f64) -> f64 {
    ((kelvin - KELVIN_OFFSET) * 10.0).round() / 10.0
}
