//! Geographic coordinate shared by the location, weather and places crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("Latitude must be finite and within [-90, 90], got {0}")]
    Latitude(f64),
    #[error("Longitude must be finite and within [-180, 180], got {0}")]
    Longitude(f64),
}

/// A (latitude, longitude) pair in signed degrees.
///
/// Always finite and in range; the only way to build one is [`Coordinate::new`].
/// (0.0, 0.0) is a perfectly valid position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// "lat,lon" form used by the places provider's `ll` parameter.
    #[must_use]
    pub fn to_ll(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCoordinate::deserialize(deserializer)?;
        Coordinate::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(40.0, -74.0).unwrap();
        assert_eq!(c.latitude(), 40.0);
        assert_eq!(c.longitude(), -74.0);
    }

    #[test]
    fn test_null_island_is_valid() {
        let c = Coordinate::new(0.0, 0.0).unwrap();
        assert_eq!(c.to_ll(), "0,0");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(CoordinateError::Longitude(-180.1))
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_ll_format() {
        let c = Coordinate::new(40.7128, -74.006).unwrap();
        assert_eq!(c.to_ll(), "40.7128,-74.006");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#).unwrap();
        assert_eq!(ok.latitude(), 1.5);

        let bad: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": 100.0, "longitude": 2.5}"#);
        assert!(bad.is_err());
    }
}
