//! Address DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CanonicalAddress, NewSavedAddress, SavedAddress};
use crate::shared::not_blank;

/// Free-text verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyAddressRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Address is required"))]
    pub address: String,
}

/// Reverse geocoding request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GeolocationRequest {
    #[validate(
        required(message = "Latitude is required"),
        range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,
    #[validate(
        required(message = "Longitude is required"),
        range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifiedAddressResponse {
    pub address: CanonicalAddress,
}

/// Coordinate accepted as decimal text or as a JSON number
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CoordinateInput {
    Text(String),
    Number(f64),
}

impl CoordinateInput {
    fn into_text(self) -> Option<String> {
        let text = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(value) => value.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Address book entry to create, usually a verification result
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAddressRequest {
    pub label: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Street is required"))]
    pub street: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
    pub state: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Postal code is required"))]
    pub postal_code: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Country is required"))]
    pub country: String,
    pub country_code: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Formatted address is required"))]
    pub formatted_address: String,
    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,
    pub place_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<SaveAddressRequest> for NewSavedAddress {
    fn from(r: SaveAddressRequest) -> Self {
        Self {
            label: r.label,
            street: r.street,
            city: r.city,
            state: non_blank(r.state),
            postal_code: r.postal_code,
            country: r.country,
            country_code: non_blank(r.country_code),
            formatted_address: r.formatted_address,
            latitude: r.latitude.and_then(CoordinateInput::into_text),
            longitude: r.longitude.and_then(CoordinateInput::into_text),
            place_id: non_blank(r.place_id),
        }
    }
}

/// Label change; a missing, null or blank label clears it
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLabelRequest {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavedAddressesResponse {
    pub addresses: Vec<SavedAddress>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavedAddressResponse {
    pub address: SavedAddress,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinates_as_text_or_number() {
        let request: SaveAddressRequest = serde_json::from_value(json!({
            "street": "1 Main St",
            "city": "Springfield",
            "postalCode": "12345",
            "country": "United States",
            "formattedAddress": "1 Main St, Springfield",
            "latitude": "39.78",
            "longitude": -89.65,
            "state": ""
        }))
        .unwrap();

        let new: NewSavedAddress = request.into();
        assert_eq!(new.latitude.as_deref(), Some("39.78"));
        assert_eq!(new.longitude.as_deref(), Some("-89.65"));
        assert_eq!(new.state, None);
    }

    #[test]
    fn test_missing_required_fields_fail_validation() {
        let request: SaveAddressRequest =
            serde_json::from_value(json!({ "street": "1 Main St" })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_geolocation_range() {
        let ok: GeolocationRequest =
            serde_json::from_value(json!({ "latitude": 45.0, "longitude": 7.5 })).unwrap();
        assert!(ok.validate().is_ok());

        let missing: GeolocationRequest =
            serde_json::from_value(json!({ "latitude": 45.0 })).unwrap();
        assert!(missing.validate().is_err());

        let out: GeolocationRequest =
            serde_json::from_value(json!({ "latitude": 95.0, "longitude": 0 })).unwrap();
        assert!(out.validate().is_err());
    }
}
