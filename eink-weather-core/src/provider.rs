use crate::{
    config::Config,
    error::{DecodeError, FetchError},
    i18n::Language,
    location::Location,
    transport::Transport,
};
use std::{
    fmt::{self, Debug},
    io::Read,
    marker::PhantomData,
};

pub mod openweather;
pub mod positionstack;
pub mod timezonedb;
pub mod waqi;

pub use openweather::OpenWeather;
pub use positionstack::PositionStack;
pub use timezonedb::TimeZoneDb;
pub use waqi::Waqi;

const REDACTED_KEY: &str = "***";

pub type TimeZoneRequest = ApiRequest<TimeZoneDb>;
pub type AirQualityRequest = ApiRequest<Waqi>;
pub type GeocodingRequest = ApiRequest<PositionStack>;
pub type WeatherRequest = ApiRequest<OpenWeather>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    TimeZoneDb,
    Waqi,
    PositionStack,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::TimeZoneDb => "timezonedb",
            ProviderId::Waqi => "waqi",
            ProviderId::PositionStack => "positionstack",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::TimeZoneDb,
            ProviderId::Waqi,
            ProviderId::PositionStack,
            ProviderId::OpenWeather,
        ]
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "timezonedb" => Ok(ProviderId::TimeZoneDb),
            "waqi" => Ok(ProviderId::Waqi),
            "positionstack" => Ok(ProviderId::PositionStack),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: timezonedb, waqi, positionstack, openweather."
            )),
        }
    }
}

/// One HTTP data source: where it lives, how its query path looks,
/// and how its response body becomes a typed payload.
pub trait Api {
    const ID: ProviderId;
    const DEFAULT_SERVER: &'static str;
    /// Key baked in at build time, empty when none was provided.
    const DEFAULT_API_KEY: &'static str;

    type Response: Clone + Debug + PartialEq;

    fn make_path(api_key: &str, location: &Location, language: Language) -> String;

    fn decode<R: Read>(body: R) -> Result<Self::Response, DecodeError>;
}

/// A request to one provider together with the payload it received.
#[derive(Debug, Clone)]
pub struct ApiRequest<A: Api> {
    server: String,
    api_key: String,
    path: String,
    built_for: Option<Location>,
    language: Language,
    response: Option<A::Response>,
    api: PhantomData<A>,
}

impl<A: Api> ApiRequest<A> {
    /// Request against the provider's public server with the built-in key.
    pub fn new() -> Self {
        Self::with_endpoint(A::DEFAULT_SERVER, A::DEFAULT_API_KEY)
    }

    /// Request against a custom server and key, e.g. a mock or a mirror.
    pub fn with_endpoint(server: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            api_key: api_key.into(),
            path: String::new(),
            built_for: None,
            language: Language::default(),
            response: None,
            api: PhantomData,
        }
    }

    /// Configured server and key where present, built-in defaults otherwise.
    pub fn from_config(config: &Config) -> Self {
        let provider = config.provider_config(A::ID);
        let server = provider
            .and_then(|p| p.server.as_deref())
            .unwrap_or(A::DEFAULT_SERVER);
        let api_key = config
            .provider_api_key(A::ID)
            .filter(|key| !key.is_empty())
            .unwrap_or(A::DEFAULT_API_KEY);

        Self::with_endpoint(server, api_key).language(config.language)
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn provider(&self) -> ProviderId {
        A::ID
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Empty until [`build_path`](Self::build_path) runs.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Derives the query path for `location`, replacing any earlier one.
    pub fn build_path(&mut self, location: &Location) {
        self.path = A::make_path(&self.api_key, location, self.language);
        self.built_for = Some(location.clone());
    }

    pub fn server_path(&self) -> String {
        format!("{}{}", self.server, self.path)
    }

    /// Full URL. Servers without a scheme are reached over HTTPS.
    pub fn url(&self) -> Result<String, FetchError> {
        if self.path.is_empty() {
            return Err(FetchError::PathNotBuilt);
        }
        Ok(self.with_scheme(&self.path))
    }

    /// URL with the API key masked, for logs and terminal output.
    pub fn redacted_url(&self) -> String {
        match &self.built_for {
            Some(location) if !self.api_key.is_empty() => {
                self.with_scheme(&A::make_path(REDACTED_KEY, location, self.language))
            }
            Some(_) => self.with_scheme(&self.path),
            None => self.server_path(),
        }
    }

    fn with_scheme(&self, path: &str) -> String {
        if self.server.contains("://") {
            format!("{}{}", self.server, path)
        } else {
            format!("https://{}{}", self.server, path)
        }
    }

    pub fn response(&self) -> Option<&A::Response> {
        self.response.as_ref()
    }

    pub fn take_response(&mut self) -> Option<A::Response> {
        self.response.take()
    }

    /// Decodes `body` into this request's payload. On error the payload is left as it was.
    pub fn handle_response<R: Read>(&mut self, body: R) -> Result<(), DecodeError> {
        let decoded = A::decode(body)?;
        self.response = Some(decoded);
        Ok(())
    }

    pub async fn fetch(&mut self, transport: &dyn Transport) -> Result<(), FetchError> {
        let url = self.url()?;
        tracing::debug!("Fetching {} from {}", A::ID, self.redacted_url());

        let body = transport.get(&url).await?;
        self.handle_response(body.as_slice())?;
        Ok(())
    }
}

impl<A: Api> Default for ApiRequest<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Any of the four provider requests, dispatched by variant.
#[derive(Debug, Clone)]
pub enum Request {
    TimeZone(TimeZoneRequest),
    AirQuality(AirQualityRequest),
    Geocoding(GeocodingRequest),
    Weather(WeatherRequest),
}

macro_rules! dispatch {
    ($request:expr, $inner:ident => $body:expr) => {
        match $request {
            Request::TimeZone($inner) => $body,
            Request::AirQuality($inner) => $body,
            Request::Geocoding($inner) => $body,
            Request::Weather($inner) => $body,
        }
    };
}

impl Request {
    pub fn provider(&self) -> ProviderId {
        dispatch!(self, r => r.provider())
    }

    pub fn path(&self) -> &str {
        dispatch!(self, r => r.path())
    }

    pub fn build_path(&mut self, location: &Location) {
        dispatch!(self, r => r.build_path(location))
    }

    pub fn server_path(&self) -> String {
        dispatch!(self, r => r.server_path())
    }

    pub fn url(&self) -> Result<String, FetchError> {
        dispatch!(self, r => r.url())
    }

    pub fn redacted_url(&self) -> String {
        dispatch!(self, r => r.redacted_url())
    }

    pub fn has_response(&self) -> bool {
        dispatch!(self, r => r.response().is_some())
    }

    pub fn handle_response<R: Read>(&mut self, body: R) -> Result<(), DecodeError> {
        dispatch!(self, r => r.handle_response(body))
    }

    pub async fn fetch(&mut self, transport: &dyn Transport) -> Result<(), FetchError> {
        dispatch!(self, r => r.fetch(transport).await)
    }
}

impl From<TimeZoneRequest> for Request {
    fn from(request: TimeZoneRequest) -> Self {
        Request::TimeZone(request)
    }
}

impl From<AirQualityRequest> for Request {
    fn from(request: AirQualityRequest) -> Self {
        Request::AirQuality(request)
    }
}

impl From<GeocodingRequest> for Request {
    fn from(request: GeocodingRequest) -> Self {
        Request::Geocoding(request)
    }
}

impl From<WeatherRequest> for Request {
    fn from(request: WeatherRequest) -> Self {
        Request::Weather(request)
    }
}

/// Performs `request` over `transport`, filling its payload on success only.
pub async fn fetch(transport: &dyn Transport, request: &mut Request) -> Result<(), FetchError> {
    request.fetch(transport).await
}

/// All four requests for `location`, configured from `config`, with paths built.
pub fn requests_for(config: &Config, location: &Location) -> Vec<Request> {
    let mut requests: Vec<Request> = vec![
        GeocodingRequest::from_config(config).into(),
        TimeZoneRequest::from_config(config).into(),
        AirQualityRequest::from_config(config).into(),
        WeatherRequest::from_config(config).into(),
    ];
    for request in &mut requests {
        request.build_path(location);
    }
    requests
}
