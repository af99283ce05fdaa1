use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

use crate::{error::DecodeError, i18n::Language, location::Location, model::AirQualityResponse};

use super::{Api, ProviderId};

/// World Air Quality Index geo feed.
#[derive(Debug, Clone, Copy)]
pub struct Waqi;

impl Api for Waqi {
    const ID: ProviderId = ProviderId::Waqi;
    const DEFAULT_SERVER: &'static str = "api.waqi.info";
    const DEFAULT_API_KEY: &'static str = match option_env!("EINK_WEATHER_WAQI_KEY") {
        Some(key) => key,
        None => "",
    };

    type Response = AirQualityResponse;

    fn make_path(api_key: &str, location: &Location, _language: Language) -> String {
        format!("/feed/geo:{:.2};{:.2}/?token={api_key}", location.lat, location.lon)
    }

    fn decode<R: Read>(body: R) -> Result<AirQualityResponse, DecodeError> {
        let parsed: WaqiResponse = serde_json::from_reader(body)?;

        if parsed.status != "ok" {
            // On errors `data` holds the message text.
            let message = parsed.data.as_str().unwrap_or_default().to_string();
            return Err(DecodeError::Status { status: parsed.status, message });
        }

        let data: WaqiData = serde_json::from_value(parsed.data)?;
        let pm25 = data.iaqi.pm25.ok_or(DecodeError::Empty("PM2.5 reading"))?;

        Ok(AirQualityResponse { pm25: pm25.v.round() as i32 })
    }
}

#[derive(Debug, Deserialize)]
struct WaqiResponse {
    status: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct WaqiData {
    iaqi: WaqiIaqi,
}

#[derive(Debug, Deserialize)]
struct WaqiIaqi {
    pm25: Option<WaqiValue>,
}

#[derive(Debug, Deserialize)]
struct WaqiValue {
    v: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_embeds_coordinates_and_token() {
        let loc = Location::new("Warsaw", 52.2297, 21.0122);
        assert_eq!(Waqi::make_path("TOKEN", &loc, Language::En), "/feed/geo:52.23;21.01/?token=TOKEN");
    }

    #[test]
    fn decode_rounds_pm25() {
        let body = br#"{"status":"ok","data":{"aqi":54,"iaqi":{"pm25":{"v":23.6},"no2":{"v":4}}}}"#;
        assert_eq!(Waqi::decode(&body[..]).expect("valid").pm25, 24);
    }

    #[test]
    fn decode_reports_provider_error() {
        let body = br#"{"status":"error","data":"Invalid key"}"#;
        match Waqi::decode(&body[..]) {
            Err(DecodeError::Status { status, message }) => {
                assert_eq!(status, "error");
                assert_eq!(message, "Invalid key");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn decode_requires_pm25() {
        let body = br#"{"status":"ok","data":{"iaqi":{"o3":{"v":30}}}}"#;
        assert!(matches!(Waqi::decode(&body[..]), Err(DecodeError::Empty(_))));
    }
}
