//! Typed response payloads, one per provider, in provider-native units.

use serde::{Deserialize, Serialize};

/// Number of daily forecasts kept from a weather response.
pub const DAILY_CAPACITY: usize = 2;
/// Number of hourly precipitation slots kept from a weather response.
pub const RAIN_CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZoneResponse {
    pub utc_timestamp: i64,
    pub gmt_offset_seconds: i32,
    pub dst: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityResponse {
    pub pm25: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResponse {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

/// Conditions right now. Temperatures in Kelvin, wind in m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub date_ts: i64,
    pub sunrise_ts: i64,
    pub sunset_ts: i64,
    pub temp_k: f64,
    pub feels_like_k: f64,
    pub pressure_hpa: i32,
    pub cloud_pct: i32,
    pub wind_speed_ms: f64,
    pub wind_deg: i32,
    pub condition_code: String,
    pub description: String,
    pub precip_prob_pct: Option<i32>,
    pub snow_mm: f64,
    pub rain_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date_ts: i64,
    pub max_temp_k: f64,
    pub min_temp_k: f64,
    pub wind_speed_ms: f64,
    pub wind_deg: i32,
    pub precip_prob_pct: i32,
    pub snow_mm: f64,
    pub rain_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRain {
    pub date_ts: i64,
    pub precip_prob_pct: i32,
    pub snow_mm: f64,
    pub rain_mm: f64,
    pub condition_code: String,
}

impl HourlyRain {
    /// Total precipitation for the hour, rain and snow together.
    pub fn total_mm(&self) -> f64 {
        self.rain_mm + self.snow_mm
    }
}

/// Current conditions plus at most [`DAILY_CAPACITY`] days and [`RAIN_CAPACITY`] hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub current: CurrentWeather,
    pub daily: Vec<DailyForecast>,
    pub rain: Vec<HourlyRain>,
}
