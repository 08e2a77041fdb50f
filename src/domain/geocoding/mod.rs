//! Geocoding capability
//!
//! One canonical output type, one trait, one implementation per provider.
//! The implementation is chosen from configuration at startup.

use std::sync::Arc;

use async_trait::async_trait;

use super::address::CanonicalAddress;
use crate::shared::{DomainError, DomainResult, GeocodeError};

/// A validated latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Accepts latitude in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::Validation(
                "Latitude must be between -90 and 90".into(),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation(
                "Longitude must be between -180 and 180".into(),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Translates one third-party geocoding API into [`CanonicalAddress`].
///
/// Implementations perform exactly one outbound call per method and keep no
/// state between calls.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Short provider name used in logs and metrics
    fn name(&self) -> &'static str;

    /// Forward geocode a trimmed, non-empty free-text query.
    async fn geocode(&self, query: &str) -> Result<CanonicalAddress, GeocodeError>;

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<CanonicalAddress, GeocodeError>;
}

pub type SharedGeocodingProvider = Arc<dyn GeocodingProvider>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
        assert!(Coordinates::new(90.0001, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_latitude_message() {
        match Coordinates::new(120.0, 0.0) {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("Latitude")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
