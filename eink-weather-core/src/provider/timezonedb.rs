use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

use crate::{error::DecodeError, i18n::Language, location::Location, model::TimeZoneResponse};

use super::{Api, ProviderId};

/// timezonedb.com position lookup.
#[derive(Debug, Clone, Copy)]
pub struct TimeZoneDb;

impl Api for TimeZoneDb {
    const ID: ProviderId = ProviderId::TimeZoneDb;
    const DEFAULT_SERVER: &'static str = "api.timezonedb.com";
    const DEFAULT_API_KEY: &'static str = match option_env!("EINK_WEATHER_TIMEZONEDB_KEY") {
        Some(key) => key,
        None => "",
    };

    type Response = TimeZoneResponse;

    fn make_path(api_key: &str, location: &Location, _language: Language) -> String {
        format!(
            "/v2.1/get-time-zone?key={api_key}&format=json&by=position&lat={:.2}&lng={:.2}",
            location.lat, location.lon
        )
    }

    fn decode<R: Read>(body: R) -> Result<TimeZoneResponse, DecodeError> {
        let parsed: TzdbResponse = serde_json::from_reader(body)?;

        if parsed.status != "OK" {
            return Err(DecodeError::Status { status: parsed.status, message: parsed.message });
        }

        // `timestamp` is already shifted into local time.
        Ok(TimeZoneResponse {
            utc_timestamp: parsed.timestamp - i64::from(parsed.gmt_offset),
            gmt_offset_seconds: parsed.gmt_offset,
            dst: is_set(&parsed.dst),
        })
    }
}

fn is_set(flag: &Value) -> bool {
    match flag {
        Value::String(s) => s == "1",
        Value::Number(n) => n.as_i64() == Some(1),
        Value::Bool(b) => *b,
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TzdbResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    gmt_offset: i32,
    #[serde(default)]
    dst: Value,
    #[serde(default)]
    timestamp: i64,
}
