//! Google Geocoding API adapter
//!
//! Responses carry an ordered list of typed address components; the first
//! result is normalized into a [`CanonicalAddress`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{coordinate_text, transport_error};
use crate::domain::{CanonicalAddress, Coordinates, GeocodingProvider};
use crate::shared::GeocodeError;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    #[serde(default)]
    long_name: String,
    #[serde(default)]
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, GeocodeError> {
        self.api_key.as_deref().ok_or_else(|| {
            GeocodeError::Configuration(
                "Google Maps API key is not configured. Please add GOOGLE_MAPS_API_KEY to your environment variables."
                    .to_string(),
            )
        })
    }

    async fn fetch(&self, search: (&str, String)) -> Result<GeocodeResult, GeocodeError> {
        let key = self.api_key()?;
        let url = format!("{}{}", self.base_url, GEOCODE_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[(search.0, search.1.as_str()), ("key", key)])
            .send()
            .await
            .map_err(transport_error)?;

        let http_status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        let parsed: GeocodeResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !http_status.is_success() => {
                return Err(GeocodeError::Provider(format!("HTTP {}", http_status.as_u16())));
            }
            Err(e) => {
                return Err(GeocodeError::Provider(format!("invalid response: {}", e)));
            }
        };

        first_result(parsed)
    }
}

/// Map the provider status onto the adapter outcome.
fn first_result(response: GeocodeResponse) -> Result<GeocodeResult, GeocodeError> {
    match response.status.as_str() {
        "OK" => response
            .results
            .into_iter()
            .next()
            .ok_or(GeocodeError::NotFound),
        "ZERO_RESULTS" => Err(GeocodeError::NotFound),
        status => {
            if let Some(message) = &response.error_message {
                warn!(status, message = %message, "Google geocoding rejected the request");
            }
            Err(GeocodeError::Provider(status.to_string()))
        }
    }
}

fn find_component<'a>(
    components: &'a [AddressComponent],
    types: &[&str],
) -> Option<&'a AddressComponent> {
    components
        .iter()
        .find(|c| types.iter().any(|t| c.types.iter().any(|ct| ct == t)))
}

/// Normalize one result. `location` overrides the result geometry (reverse
/// lookups echo the caller's coordinates).
fn normalize(result: GeocodeResult, location: Option<Coordinates>) -> CanonicalAddress {
    let components = &result.address_components;
    let long = |types: &[&str]| find_component(components, types).map(|c| c.long_name.clone());
    let short = |types: &[&str]| find_component(components, types).map(|c| c.short_name.clone());

    let street = [long(&["street_number"]), long(&["route"])]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let city = long(&["locality", "sublocality"])
        .filter(|c| !c.is_empty())
        .or_else(|| long(&["administrative_area_level_2"]))
        .unwrap_or_default();

    let (latitude, longitude) = match (location, &result.geometry) {
        (Some(coords), _) => (
            coordinate_text(coords.latitude()),
            coordinate_text(coords.longitude()),
        ),
        (None, Some(geometry)) => (
            coordinate_text(geometry.location.lat),
            coordinate_text(geometry.location.lng),
        ),
        (None, None) => (String::new(), String::new()),
    };

    CanonicalAddress {
        street,
        city,
        state: short(&["administrative_area_level_1"]).unwrap_or_default(),
        postal_code: long(&["postal_code"]).unwrap_or_default(),
        country: long(&["country"]).unwrap_or_default(),
        country_code: short(&["country"]).unwrap_or_default(),
        formatted_address: result.formatted_address,
        latitude,
        longitude,
        place_id: result.place_id,
    }
}

#[async_trait]
impl GeocodingProvider for GoogleGeocoder {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn geocode(&self, query: &str) -> Result<CanonicalAddress, GeocodeError> {
        debug!(query, "Google geocode");
        let result = self.fetch(("address", query.to_string())).await?;
        Ok(normalize(result, None))
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<CanonicalAddress, GeocodeError> {
        let latlng = format!(
            "{},{}",
            coordinate_text(coordinates.latitude()),
            coordinate_text(coordinates.longitude())
        );
        debug!(latlng = %latlng, "Google reverse geocode");
        let result = self.fetch(("latlng", latlng)).await?;
        Ok(normalize(result, Some(coordinates)))
    }
}
