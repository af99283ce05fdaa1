use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

use crate::{
    error::DecodeError,
    i18n::Language,
    location::Location,
    model::{
        CurrentWeather, DAILY_CAPACITY, DailyForecast, HourlyRain, RAIN_CAPACITY, WeatherResponse,
    },
};

use super::{Api, ProviderId};

/// OpenWeather One Call: current conditions, hourly and daily forecast in one response.
#[derive(Debug, Clone, Copy)]
pub struct OpenWeather;

impl Api for OpenWeather {
    const ID: ProviderId = ProviderId::OpenWeather;
    const DEFAULT_SERVER: &'static str = "api.openweathermap.org";
    const DEFAULT_API_KEY: &'static str = match option_env!("EINK_WEATHER_OPENWEATHER_KEY") {
        Some(key) => key,
        None => "",
    };

    type Response = WeatherResponse;

    // No `units` parameter: temperatures come back in Kelvin.
    fn make_path(api_key: &str, location: &Location, language: Language) -> String {
        format!(
            "/data/2.5/onecall?lat={:.2}&lon={:.2}&exclude=minutely,alerts&appid={api_key}&lang={}",
            location.lat,
            location.lon,
            language.code()
        )
    }

    fn decode<R: Read>(body: R) -> Result<WeatherResponse, DecodeError> {
        let parsed: OwOneCall = serde_json::from_reader(body)?;

        let Some(current) = parsed.current else {
            let status = match parsed.cod {
                Some(Value::String(code)) => code,
                Some(code) => code.to_string(),
                None => "unknown".to_string(),
            };
            return Err(DecodeError::Status {
                status,
                message: parsed.message.unwrap_or_default(),
            });
        };

        let condition = current.weather.into_iter().next().unwrap_or_default();

        let current = CurrentWeather {
            date_ts: current.dt,
            sunrise_ts: current.sunrise,
            sunset_ts: current.sunset,
            temp_k: current.temp,
            feels_like_k: current.feels_like,
            pressure_hpa: current.pressure.round() as i32,
            cloud_pct: current.clouds.round() as i32,
            wind_speed_ms: current.wind_speed,
            wind_deg: current.wind_deg.round() as i32,
            condition_code: condition.icon,
            description: condition.description,
            precip_prob_pct: parsed.hourly.first().map(|h| probability_pct(h.pop)),
            snow_mm: current.snow.map(|v| v.one_hour).unwrap_or_default(),
            rain_mm: current.rain.map(|v| v.one_hour).unwrap_or_default(),
        };

        let daily = parsed
            .daily
            .into_iter()
            .take(DAILY_CAPACITY)
            .map(|d| DailyForecast {
                date_ts: d.dt,
                max_temp_k: d.temp.max,
                min_temp_k: d.temp.min,
                wind_speed_ms: d.wind_speed,
                wind_deg: d.wind_deg.round() as i32,
                precip_prob_pct: probability_pct(d.pop),
                snow_mm: d.snow,
                rain_mm: d.rain,
            })
            .collect();

        // The first hourly entry is the hour in progress.
        let rain = parsed
            .hourly
            .into_iter()
            .skip(1)
            .take(RAIN_CAPACITY)
            .map(|h| HourlyRain {
                date_ts: h.dt,
                precip_prob_pct: probability_pct(h.pop),
                snow_mm: h.snow.map(|v| v.one_hour).unwrap_or_default(),
                rain_mm: h.rain.map(|v| v.one_hour).unwrap_or_default(),
                condition_code: h.weather.into_iter().next().unwrap_or_default().icon,
            })
            .collect();

        Ok(WeatherResponse { current, daily, rain })
    }
}

fn probability_pct(pop: f64) -> i32 {
    (pop * 100.0).round() as i32
}

#[derive(Debug, Default, Deserialize)]
struct OwWeather {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwVolume {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    dt: i64,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
    temp: f64,
    feels_like: f64,
    pressure: f64,
    #[serde(default)]
    clouds: f64,
    wind_speed: f64,
    #[serde(default)]
    wind_deg: f64,
    #[serde(default)]
    weather: Vec<OwWeather>,
    rain: Option<OwVolume>,
    snow: Option<OwVolume>,
}

#[derive(Debug, Deserialize)]
struct OwHourly {
    dt: i64,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    weather: Vec<OwWeather>,
    rain: Option<OwVolume>,
    snow: Option<OwVolume>,
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwDaily {
    dt: i64,
    temp: OwDailyTemp,
    wind_speed: f64,
    #[serde(default)]
    wind_deg: f64,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    rain: f64,
    #[serde(default)]
    snow: f64,
}

#[derive(Debug, Deserialize)]
struct OwOneCall {
    current: Option<OwCurrent>,
    #[serde(default)]
    hourly: Vec<OwHourly>,
    #[serde(default)]
    daily: Vec<OwDaily>,
    cod: Option<Value>,
    message: Option<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn one_call_body() -> String {
        let hourly: Vec<Value> = (0..8)
            .map(|i| {
                serde_json::json!({
                    "dt": 1_710_079_200 + i * 3600,
                    "temp": 282.0,
                    "pop": 0.1 * i as f64,
                    "rain": {"1h": 0.25 * i as f64},
                    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
                })
            })
            .collect();

        serde_json::json!({
            "lat": 52.23, "lon": 21.01, "timezone": "Europe/Warsaw", "timezone_offset": 3600,
            "current": {
                "dt": 1_710_079_500, "sunrise": 1_710_046_800, "sunset": 1_710_088_800,
                "temp": 283.15, "feels_like": 280.4, "pressure": 1013, "humidity": 80,
                "clouds": 75, "wind_speed": 5.0, "wind_deg": 225,
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "rain": {"1h": 0.4}
            },
            "hourly": hourly,
            "daily": [
                {"dt": 1_710_064_800, "temp": {"min": 278.15, "max": 285.65}, "wind_speed": 6.1,
                 "wind_deg": 200, "pop": 0.8, "rain": 3.2},
                {"dt": 1_710_151_200, "temp": {"min": 276.0, "max": 281.0}, "wind_speed": 3.0,
                 "wind_deg": 90, "pop": 0.0},
                {"dt": 1_710_237_600, "temp": {"min": 275.0, "max": 280.0}, "wind_speed": 2.0,
                 "wind_deg": 45, "pop": 0.0}
            ]
        })
        .to_string()
    }

    #[test]
    fn path_requests_kelvin_and_language() {
        let loc = Location::new("Warsaw", 52.2297, 21.0122);
        assert_eq!(
            OpenWeather::make_path("APPID", &loc, Language::En),
            "/data/2.5/onecall?lat=52.23&lon=21.01&exclude=minutely,alerts&appid=APPID&lang=en"
        );
    }

    #[test]
    fn decode_fills_current_conditions() {
        let weather = OpenWeather::decode(one_call_body().as_bytes()).expect("valid body");
        let current = &weather.current;
        assert_eq!(current.date_ts, 1_710_079_500);
        assert!((current.temp_k - 283.15).abs() < 1e-9);
        assert_eq!(current.pressure_hpa, 1013);
        assert_eq!(current.cloud_pct, 75);
        assert_eq!(current.wind_deg, 225);
        assert_eq!(current.condition_code, "10d");
        assert_eq!(current.description, "light rain");
        assert_eq!(current.precip_prob_pct, Some(0));
        assert!((current.rain_mm - 0.4).abs() < 1e-9);
        assert_eq!(current.snow_mm, 0.0);
    }

    #[test]
    fn decode_caps_daily_and_rain_slots() {
        let weather = OpenWeather::decode(one_call_body().as_bytes()).expect("valid body");
        assert_eq!(weather.daily.len(), DAILY_CAPACITY);
        assert_eq!(weather.daily[0].precip_prob_pct, 80);
        assert!((weather.daily[0].rain_mm - 3.2).abs() < 1e-9);
        assert_eq!(weather.daily[1].rain_mm, 0.0);

        assert_eq!(weather.rain.len(), RAIN_CAPACITY);
        assert_eq!(weather.rain[0].date_ts, 1_710_079_200 + 3600);
        assert_eq!(weather.rain[0].precip_prob_pct, 10);
        assert_eq!(weather.rain[4].precip_prob_pct, 50);
        assert!((weather.rain[1].total_mm() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn decode_reports_api_error() {
        let body = br#"{"cod":401,"message":"Invalid API key."}"#;
        match OpenWeather::decode(&body[..]) {
            Err(DecodeError::Status { status, message }) => {
                assert_eq!(status, "401");
                assert_eq!(message, "Invalid API key.");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn decode_reports_string_error_code_without_quotes() {
        let body = br#"{"cod":"404","message":"Not found"}"#;
        match OpenWeather::decode(&body[..]) {
            Err(DecodeError::Status { status, .. }) => assert_eq!(status, "404"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_truncated_body() {
        let body = one_call_body();
        let truncated = &body.as_bytes()[..body.len() / 2];
        assert!(matches!(OpenWeather::decode(truncated), Err(DecodeError::Json(_))));
    }
}
