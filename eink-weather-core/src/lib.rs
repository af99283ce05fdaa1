//! Core library for the `eink-weather` station.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Requests to the time zone, air quality, geocoding and weather providers
//! - The refresh cycle that turns provider data into a screen view
//! - Drawing the view onto any [`render::Canvas`]
//!
//! It is used by `eink-weather-cli`, but a firmware shim can drive it the same way.

pub mod config;
pub mod error;
pub mod fmt;
pub mod i18n;
pub mod icons;
pub mod location;
pub mod model;
pub mod provider;
pub mod reading;
pub mod render;
pub mod station;
pub mod transport;
pub mod units;
pub mod view;
pub mod wind_arrow;

pub use config::{Config, LocationConfig, ProviderConfig};
pub use error::{DecodeError, FetchError, LocationError};
pub use i18n::Language;
pub use location::Location;
pub use model::{AirQualityResponse, GeocodingResponse, TimeZoneResponse, WeatherResponse};
pub use provider::{Api, ApiRequest, ProviderId, Request};
pub use reading::Reading;
pub use render::{Canvas, render};
pub use station::{Readings, Station};
pub use transport::{HttpTransport, Transport};
pub use view::{View, build_view};
