//! Mapbox Geocoding v5 adapter
//!
//! Each feature carries a flat `context` list whose ids are prefixed by a
//! category token (`place.123`, `region.456`, ...).

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::{coordinate_text, transport_error};
use crate::domain::{CanonicalAddress, Coordinates, GeocodingProvider};
use crate::shared::GeocodeError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: String,
    /// House number, when the feature is an address
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    place_name: String,
    #[serde(default)]
    center: Vec<f64>,
    #[serde(default)]
    context: Vec<ContextEntry>,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    short_code: Option<String>,
}

pub struct MapboxGeocoder {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl MapboxGeocoder {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            access_token,
        }
    }

    fn access_token(&self) -> Result<&str, GeocodeError> {
        self.access_token.as_deref().ok_or_else(|| {
            GeocodeError::Configuration(
                "Mapbox access token is not configured. Please add MAPBOX_ACCESS_TOKEN to your environment variables."
                    .to_string(),
            )
        })
    }

    /// `{base}/geocoding/v5/mapbox.places/{search}.json`, with the search text
    /// percent-encoded as a single path segment.
    fn places_url(&self, search: &str) -> Result<Url, GeocodeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GeocodeError::Configuration(format!("invalid Mapbox base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| GeocodeError::Configuration("invalid Mapbox base URL".to_string()))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", &format!("{}.json", search)]);
        Ok(url)
    }

    async fn fetch(&self, search: &str) -> Result<Feature, GeocodeError> {
        let token = self.access_token()?;
        let url = self.places_url(search)?;

        let response = self
            .client
            .get(url)
            .query(&[("access_token", token), ("limit", "1")])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(GeocodeError::Provider(message));
        }

        let collection: FeatureCollection = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::Provider(format!("invalid response: {}", e)))?;

        collection
            .features
            .into_iter()
            .next()
            .ok_or(GeocodeError::NotFound)
    }
}

fn context_with<'a>(feature: &'a Feature, prefix: &str) -> Option<&'a ContextEntry> {
    feature.context.iter().find(|c| c.id.starts_with(prefix))
}

fn normalize(feature: Feature, location: Option<Coordinates>) -> CanonicalAddress {
    let street = match feature.address.as_deref().filter(|a| !a.is_empty()) {
        Some(number) => format!("{} {}", number, feature.text),
        None => feature.text.clone(),
    };

    let city = ["place", "locality", "district"]
        .iter()
        .find_map(|prefix| context_with(&feature, prefix))
        .map(|c| c.text.clone())
        .unwrap_or_default();

    let state = context_with(&feature, "region")
        .map(|region| match region.short_code.as_deref() {
            Some(code) if !code.is_empty() => {
                code.strip_prefix("US-").unwrap_or(code).to_string()
            }
            _ => region.text.clone(),
        })
        .unwrap_or_default();

    let postal_code = context_with(&feature, "postcode")
        .map(|c| c.text.clone())
        .unwrap_or_default();

    let country_entry = context_with(&feature, "country");
    let country = country_entry.map(|c| c.text.clone()).unwrap_or_default();
    let country_code = country_entry
        .and_then(|c| c.short_code.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_default();

    // center is [lng, lat]
    let (latitude, longitude) = match (location, feature.center.as_slice()) {
        (Some(coords), _) => (
            coordinate_text(coords.latitude()),
            coordinate_text(coords.longitude()),
        ),
        (None, [lng, lat, ..]) => (coordinate_text(*lat), coordinate_text(*lng)),
        (None, _) => (String::new(), String::new()),
    };

    CanonicalAddress {
        street,
        city,
        state,
        postal_code,
        country,
        country_code,
        formatted_address: feature.place_name,
        latitude,
        longitude,
        place_id: feature.id,
    }
}

#[async_trait]
impl GeocodingProvider for MapboxGeocoder {
    fn name(&self) -> &'static str {
        "mapbox"
    }

    async fn geocode(&self, query: &str) -> Result<CanonicalAddress, GeocodeError> {
        debug!(query, "Mapbox geocode");
        let feature = self.fetch(query).await?;
        Ok(normalize(feature, None))
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<CanonicalAddress, GeocodeError> {
        let search = format!(
            "{},{}",
            coordinate_text(coordinates.longitude()),
            coordinate_text(coordinates.latitude())
        );
        debug!(search = %search, "Mapbox reverse geocode");
        let feature = self.fetch(&search).await?;
        Ok(normalize(feature, Some(coordinates)))
    }
}
