use thiserror::Error;

/// Coordinates that could not be read from their text form.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Invalid latitude '{0}'")]
    Latitude(String),
    #[error("Invalid longitude '{0}'")]
    Longitude(String),
}

/// A provider response body that could not be turned into a typed payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Provider reported status '{status}': {message}")]
    Status { status: String, message: String },
    #[error("Response contained no {0}")]
    Empty(&'static str),
}

/// Failure anywhere between issuing a request and holding its decoded payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request path not built; call build_path first")]
    PathNotBuilt,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}
