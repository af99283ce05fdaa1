//! The render-ready snapshot of one refresh cycle and the builder that produces it.

use serde::{Deserialize, Serialize};

use crate::{
    fmt::{TextFormatter, capitalize, left_pad, one_decimal},
    i18n::Language,
    icons::{UNKNOWN_GLYPH, condition_code_to_glyph},
    location::Location,
    model::{AirQualityResponse, RAIN_CAPACITY, TimeZoneResponse, WeatherResponse},
    reading::Reading,
    units::{kelvin_to_celsius, wind_ms_to_beaufort},
};

/// Columns in the hourly precipitation grid.
pub const PRECIP_SLOTS: usize = RAIN_CAPACITY;

/// Meteocons glyph for degrees Celsius.
pub const CELSIUS_GLYPH: char = '*';

/// Everything the screen shows, already formatted.
///
/// A default `View` is all placeholders, so a render can always proceed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub location: String,
    pub datetime: String,
    /// Above 100 means the device is charging.
    pub battery_percent: u32,
    pub battery_display: String,

    pub weather_icon: char,
    pub weather_desc: String,

    pub temp_high: String,
    pub temp_low: String,
    pub temp_feel: String,
    pub temp_curr: String,
    pub temp_unit: char,

    pub pressure: String,
    pub pressure_unit: String,

    pub wind: String,
    pub wind_deg: i32,
    pub wind_unit: String,

    pub aq_pm25: String,
    pub aq_pm25_unit: String,

    pub precip_time_unit: String,
    pub precip_unit: String,
    pub precip_pop_unit: String,

    pub precip_time: [String; PRECIP_SLOTS],
    pub precip_icon: [char; PRECIP_SLOTS],
    pub precip: [String; PRECIP_SLOTS],
    pub precip_pop: [String; PRECIP_SLOTS],
}

impl View {
    /// All-placeholder view with row labels in `language`.
    pub fn placeholder(language: Language) -> Self {
        Self {
            location: "Unknown".to_string(),
            datetime: "00:00  --- 00/00".to_string(),
            battery_percent: 0,
            battery_display: "---".to_string(),
            weather_icon: UNKNOWN_GLYPH,
            weather_desc: "Unknown".to_string(),
            temp_high: "--".to_string(),
            temp_low: "--".to_string(),
            temp_feel: "--".to_string(),
            temp_curr: "--".to_string(),
            temp_unit: CELSIUS_GLYPH,
            pressure: "----".to_string(),
            pressure_unit: "hPa".to_string(),
            wind: "-".to_string(),
            wind_deg: 0,
            wind_unit: "Bft".to_string(),
            aq_pm25: "---".to_string(),
            aq_pm25_unit: "PM2.5".to_string(),
            precip_time_unit: language.hour_label().to_string(),
            precip_unit: "mm".to_string(),
            precip_pop_unit: "%".to_string(),
            precip_time: std::array::from_fn(|_| "--".to_string()),
            precip_icon: [UNKNOWN_GLYPH; PRECIP_SLOTS],
            precip: std::array::from_fn(|_| "---".to_string()),
            precip_pop: std::array::from_fn(|_| "---".to_string()),
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::placeholder(Language::default())
    }
}

/// Everything [`build_view`] reads. Sources are borrowed, never modified.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub location: Option<&'a Location>,
    pub weather: &'a Reading<WeatherResponse>,
    pub air_quality: &'a Reading<AirQualityResponse>,
    pub timezone: &'a Reading<TimeZoneResponse>,
    pub battery_percent: u32,
    /// Device clock, Unix seconds.
    pub now: i64,
    /// Device clock offset, used when no time zone reading exists.
    pub utc_offset_seconds: i32,
    pub language: Language,
}

/// Builds a complete view. Missing sources leave their fields at placeholders;
/// stale sources are shown with a `!` after the header time.
pub fn build_view(inputs: &ViewInputs<'_>) -> View {
    let mut view = View::placeholder(inputs.language);

    let offset = inputs
        .timezone
        .value()
        .map(|tz| tz.gmt_offset_seconds)
        .unwrap_or(inputs.utc_offset_seconds);
    let timestamp = match inputs.timezone {
        Reading::Fresh(tz) => tz.utc_timestamp,
        _ => inputs.now,
    };
    let fmt = TextFormatter::new(offset, inputs.language);

    let updated = !(inputs.weather.is_stale()
        || inputs.air_quality.is_stale()
        || inputs.timezone.is_stale());
    view.datetime = fmt.header_datetime(timestamp, updated);

    if let Some(location) = inputs.location {
        view.location = location.name.clone();
    }

    view.battery_percent = inputs.battery_percent;
    view.battery_display = if inputs.battery_percent > 100 {
        "chg".to_string()
    } else {
        format!("{}%", inputs.battery_percent)
    };

    if let Some(weather) = inputs.weather.value() {
        fill_weather(&mut view, weather, &fmt);
    }

    if let Some(air) = inputs.air_quality.value() {
        view.aq_pm25 = left_pad(&air.pm25.to_string(), 3);
    }

    view
}

fn fill_weather(view: &mut View, weather: &WeatherResponse, fmt: &TextFormatter) {
    let current = &weather.current;

    view.temp_curr = kelvin_to_celsius(current.temp_k).to_string();
    view.temp_feel = left_pad(&kelvin_to_celsius(current.feels_like_k).to_string(), 3);
    view.pressure = left_pad(&current.pressure_hpa.to_string(), 4);
    view.wind = wind_ms_to_beaufort(current.wind_speed_ms).to_string();
    view.wind_deg = current.wind_deg;
    view.weather_icon = condition_code_to_glyph(&current.condition_code);
    if !current.description.is_empty() {
        view.weather_desc = capitalize(&current.description);
    }

    if let Some(today) = weather.daily.first() {
        view.temp_high = left_pad(&kelvin_to_celsius(today.max_temp_k).to_string(), 3);
        view.temp_low = left_pad(&kelvin_to_celsius(today.min_temp_k).to_string(), 3);
    }

    for (i, slot) in weather.rain.iter().take(PRECIP_SLOTS).enumerate() {
        view.precip_time[i] = fmt.hour(slot.date_ts);
        view.precip[i] = one_decimal(slot.total_mm());
        view.precip_pop[i] = left_pad(&slot.precip_prob_pct.to_string(), 3);
        view.precip_icon[i] = condition_code_to_glyph(&slot.condition_code);
    }
}
