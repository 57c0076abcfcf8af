//! Geographic location picked on the map.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Location`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum LocationError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A latitude/longitude pair.
///
/// Only produced by map interaction (click, marker drag) or the search and
/// current-location shortcuts. An unset location is `Option::None`, never
/// `(0, 0)`.
///
/// Serialized as `{"lat": .., "lng": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    lat: f64,
    lng: f64,
}

impl Location {
    /// Build a location, rejecting out-of-range or non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] if either coordinate is out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, LocationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(LocationError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Build a location from literal coordinates in a `const` item.
    ///
    /// Out-of-range input fails const evaluation, so this is meant for
    /// constants only; use [`Self::new`] for anything computed.
    #[must_use]
    pub const fn from_const(lat: f64, lng: f64) -> Self {
        assert!(lat >= -90.0 && lat <= 90.0, "latitude out of range");
        assert!(lng >= -180.0 && lng <= 180.0, "longitude out of range");
        Self { lat, lng }
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

#[derive(Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = LocationError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location() {
        let loc = Location::new(19.4326, -99.1332).unwrap();
        assert!((loc.lat() - 19.4326).abs() < f64::EPSILON);
        assert!((loc.lng() + 99.1332).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(Location::new(91.0, 0.0), Err(LocationError::Latitude(91.0)));
        assert_eq!(
            Location::new(0.0, -180.5),
            Err(LocationError::Longitude(-180.5))
        );
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_wire_shape() {
        let loc = Location::new(20.6597, -103.3496).unwrap();
        let json = serde_json::to_value(loc).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 20.6597, "lng": -103.3496}));
    }

    #[test]
    fn test_deserialize_checks_range() {
        let err = serde_json::from_value::<Location>(serde_json::json!({"lat": 95.0, "lng": 0.0}));
        assert!(err.is_err());
    }

    #[test]
    fn test_display() {
        let loc = Location::new(25.6866, -100.3161).unwrap();
        assert_eq!(loc.to_string(), "25.686600, -100.316100");
    }
}
