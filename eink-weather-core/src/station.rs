//! One refresh cycle: locate, fetch every source in turn, build the view.

use chrono::{DateTime, Utc};
use std::mem;

use crate::{
    config::Config,
    error::FetchError,
    location::Location,
    model::{AirQualityResponse, TimeZoneResponse, WeatherResponse},
    provider::{Api, ApiRequest, GeocodingRequest, OpenWeather, Request, TimeZoneDb, Waqi, requests_for},
    reading::Reading,
    transport::{HttpTransport, Transport},
    view::{View, ViewInputs, build_view},
};

/// The latest reading of every source feeding the view.
#[derive(Debug, Clone, Default)]
pub struct Readings {
    pub timezone: Reading<TimeZoneResponse>,
    pub air_quality: Reading<AirQualityResponse>,
    pub weather: Reading<WeatherResponse>,
}

impl Readings {
    pub fn stale_sources(&self) -> Vec<&'static str> {
        [
            ("timezone", self.timezone.is_stale()),
            ("air quality", self.air_quality.is_stale()),
            ("weather", self.weather.is_stale()),
        ]
        .into_iter()
        .filter_map(|(name, stale)| stale.then_some(name))
        .collect()
    }
}

#[derive(Debug)]
pub struct Station {
    config: Config,
    transport: Box<dyn Transport>,
    location: Option<Location>,
    readings: Readings,
}

impl Station {
    pub fn new(config: Config, transport: Box<dyn Transport>) -> Self {
        Self { config, transport, location: None, readings: Readings::default() }
    }

    /// Station talking HTTP with the configured timeout.
    pub fn from_config(config: Config) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.request_timeout())?;
        Ok(Self::new(config, Box::new(transport)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Location used by the latest cycle.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    /// The four requests this station would issue for `location`.
    pub fn requests(&self, location: &Location) -> Vec<Request> {
        requests_for(&self.config, location)
    }

    /// Configured coordinates, else a geocoding lookup of the configured name.
    /// A failed lookup falls back to the last location that worked.
    pub async fn resolve_location(&mut self) -> Option<Location> {
        let configured = match self.config.resolved_location() {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("{e:#}");
                None
            }
        };
        if configured.is_some() {
            return configured;
        }

        let Some(name) = self.config.location.as_ref().map(|l| l.name.clone()) else {
            tracing::warn!("No location configured");
            return None;
        };

        let mut request = GeocodingRequest::from_config(&self.config);
        request.build_path(&Location::named(&name));
        match request.fetch(self.transport.as_ref()).await {
            Ok(()) => request.take_response().map(|place| {
                let location = Location::new(name, place.lat, place.lon);
                tracing::info!("Geocoded {} as '{}'", location, place.label);
                location
            }),
            Err(e) => {
                tracing::warn!("Geocoding '{}' failed: {}", name, e);
                self.location.clone()
            }
        }
    }

    async fn fetch_payload<A: Api>(&self, location: &Location) -> Option<A::Response> {
        let mut request = ApiRequest::<A>::from_config(&self.config);
        request.build_path(location);

        match request.fetch(self.transport.as_ref()).await {
            Ok(()) => {
                tracing::debug!("{} updated", A::ID);
                request.take_response()
            }
            Err(e) => {
                tracing::warn!("{} fetch failed: {}", A::ID, e);
                None
            }
        }
    }

    /// Runs one cycle and returns a complete view. Sources that fail keep
    /// their previous value as stale; nothing here aborts the cycle.
    pub async fn refresh(&mut self, battery_percent: u32, now: DateTime<Utc>) -> View {
        let location = self.resolve_location().await;

        let (timezone, air_quality, weather) = match &location {
            Some(loc) => {
                tracing::info!("Refreshing for {}", loc);
                (
                    self.fetch_payload::<TimeZoneDb>(loc).await,
                    self.fetch_payload::<Waqi>(loc).await,
                    self.fetch_payload::<OpenWeather>(loc).await,
                )
            }
            None => (None, None, None),
        };

        let previous = mem::take(&mut self.readings);
        self.readings = Readings {
            timezone: previous.timezone.advance(timezone),
            air_quality: previous.air_quality.advance(air_quality),
            weather: previous.weather.advance(weather),
        };
        self.location = location;

        let stale = self.readings.stale_sources();
        if !stale.is_empty() {
            tracing::warn!("Showing stale data for: {}", stale.join(", "));
        }

        build_view(&ViewInputs {
            location: self.location.as_ref(),
            weather: &self.readings.weather,
            air_quality: &self.readings.air_quality,
            timezone: &self.readings.timezone,
            battery_percent,
            now: now.timestamp(),
            utc_offset_seconds: self.config.utc_offset_seconds,
            language: self.config.language,
        })
    }
}
