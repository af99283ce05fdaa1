use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LocationError;

/// A named point on the map. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into().trim().to_string(), lat, lon }
    }

    /// Build from user-entered text: the name is trimmed, coordinates parsed as decimals.
    pub fn parse(name: &str, lat: &str, lon: &str) -> Result<Self, LocationError> {
        let lat_value =
            lat.trim().parse::<f64>().map_err(|_| LocationError::Latitude(lat.to_string()))?;
        let lon_value =
            lon.trim().parse::<f64>().map_err(|_| LocationError::Longitude(lon.to_string()))?;
        Ok(Self::new(name, lat_value, lon_value))
    }

    /// A location known only by name, waiting for a geocoding lookup.
    pub fn named(name: &str) -> Self {
        Self::new(name, 0.0, 0.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.name, self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_name_and_reads_coordinates() {
        let loc = Location::parse("  Warsaw \n", "52.23", " 21.01").expect("valid location");
        assert_eq!(loc.name, "Warsaw");
        assert!((loc.lat - 52.23).abs() < 1e-9);
        assert!((loc.lon - 21.01).abs() < 1e-9);
    }

    #[test]
    fn parse_rejects_bad_coordinates() {
        let err = Location::parse("X", "north", "1").unwrap_err();
        assert!(matches!(err, LocationError::Latitude(_)));

        let err = Location::parse("X", "1", "").unwrap_err();
        assert!(matches!(err, LocationError::Longitude(_)));
    }

    #[test]
    fn display_shows_name_and_coordinates() {
        let loc = Location::new("Oslo", 59.9139, 10.7522);
        assert_eq!(loc.to_string(), "Oslo (59.9139, 10.7522)");
    }
}
