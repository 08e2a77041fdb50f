//! Geocoding provider adapters
//!
//! - `google`: structured address components (Google Geocoding API)
//! - `mapbox`: ranked features with a flat context list (Mapbox Geocoding v5)

pub mod google;
pub mod mapbox;

pub use google::GoogleGeocoder;
pub use mapbox::MapboxGeocoder;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{GeocodingConfig, ProviderKind};
use crate::domain::SharedGeocodingProvider;
use crate::shared::GeocodeError;

/// Build the provider selected in configuration.
///
/// Missing credentials do not fail startup: each call then reports a
/// configuration error instead.
pub fn build_provider(config: &GeocodingConfig) -> Result<SharedGeocodingProvider, GeocodeError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("address-utility/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GeocodeError::Configuration(format!("HTTP client: {}", e)))?;

    let provider: SharedGeocodingProvider = match config.provider {
        ProviderKind::Google => {
            if config.google_api_key.is_none() {
                warn!("GOOGLE_MAPS_API_KEY is not set; verification requests will fail");
            }
            Arc::new(GoogleGeocoder::new(
                client,
                config.google_base_url.clone(),
                config.google_api_key.clone(),
            ))
        }
        ProviderKind::Mapbox => {
            if config.mapbox_access_token.is_none() {
                warn!("MAPBOX_ACCESS_TOKEN is not set; verification requests will fail");
            }
            Arc::new(MapboxGeocoder::new(
                client,
                config.mapbox_base_url.clone(),
                config.mapbox_access_token.clone(),
            ))
        }
    };

    info!(
        provider = provider.name(),
        timeout_secs = config.timeout_secs,
        "Geocoding provider configured"
    );
    Ok(provider)
}

fn transport_error(e: reqwest::Error) -> GeocodeError {
    if e.is_timeout() {
        GeocodeError::Provider("request timed out".to_string())
    } else {
        GeocodeError::Provider(format!("request failed: {}", e))
    }
}

/// Decimal text for a coordinate, shortest round-trip form.
fn coordinate_text(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_text() {
        assert_eq!(coordinate_text(37.4224764), "37.4224764");
        assert_eq!(coordinate_text(-122.0842499), "-122.0842499");
        assert_eq!(coordinate_text(40.0), "40");
    }

    #[test]
    fn test_build_selects_configured_provider() {
        let mut config = GeocodingConfig::default();
        assert_eq!(build_provider(&config).unwrap().name(), "google");

        config.provider = ProviderKind::Mapbox;
        assert_eq!(build_provider(&config).unwrap().name(), "mapbox");
    }
}
