use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

use crate::{error::DecodeError, i18n::Language, location::Location, model::GeocodingResponse};

use super::{Api, ProviderId};

/// positionstack.com forward geocoding. Looks a place up by name, not coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PositionStack;

impl Api for PositionStack {
    const ID: ProviderId = ProviderId::PositionStack;
    const DEFAULT_SERVER: &'static str = "api.positionstack.com";
    const DEFAULT_API_KEY: &'static str = match option_env!("EINK_WEATHER_POSITIONSTACK_KEY") {
        Some(key) => key,
        None => "",
    };

    type Response = GeocodingResponse;

    fn make_path(api_key: &str, location: &Location, _language: Language) -> String {
        let query: String = url::form_urlencoded::byte_serialize(location.name.as_bytes()).collect();
        format!("/v1/forward?access_key={api_key}&query={query}")
    }

    fn decode<R: Read>(body: R) -> Result<GeocodingResponse, DecodeError> {
        let parsed: PsResponse = serde_json::from_reader(body)?;

        if let Some(error) = parsed.error {
            let status = match error.get("code") {
                Some(Value::String(code)) => code.clone(),
                Some(code) => code.to_string(),
                None => "error".to_string(),
            };
            let message = error.get("message").and_then(Value::as_str).unwrap_or_default();
            return Err(DecodeError::Status { status, message: message.to_string() });
        }

        let place = parsed.data.into_iter().next().ok_or(DecodeError::Empty("geocoding results"))?;

        Ok(GeocodingResponse { lat: place.latitude, lon: place.longitude, label: place.label })
    }
}

#[derive(Debug, Deserialize)]
struct PsResponse {
    #[serde(default)]
    data: Vec<PsPlace>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PsPlace {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_encodes_query_name() {
        let loc = Location::named("New York");
        assert_eq!(
            PositionStack::make_path("KEY", &loc, Language::En),
            "/v1/forward?access_key=KEY&query=New+York"
        );
    }

    #[test]
    fn decode_takes_first_match() {
        let body = br#"{"data":[
            {"latitude":50.06,"longitude":19.94,"label":"Krakow, Poland","name":"Krakow"},
            {"latitude":41.0,"longitude":-72.0,"label":"Krakow, USA"}
        ]}"#;
        let place = PositionStack::decode(&body[..]).expect("valid body");
        assert_eq!(place.label, "Krakow, Poland");
        assert!((place.lat - 50.06).abs() < 1e-9);
    }

    #[test]
    fn decode_fails_on_empty_results() {
        let body = br#"{"data":[]}"#;
        assert!(matches!(PositionStack::decode(&body[..]), Err(DecodeError::Empty(_))));
    }

    #[test]
    fn decode_surfaces_api_error() {
        let body = br#"{"error":{"code":"invalid_access_key","message":"You have not supplied a valid API Access Key."}}"#;
        let err = PositionStack::decode(&body[..]).unwrap_err();
        assert!(err.to_string().contains("invalid_access_key"));
    }
}
