//! Address domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::not_blank;

/// Provider-agnostic verified address.
///
/// Every field is text, coordinates included, so nothing is lost to float
/// formatting. Missing provider data is an empty string. A successful
/// verification always fills `formatted_address` and `place_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub country_code: String,
    pub formatted_address: String,
    pub latitude: String,
    pub longitude: String,
    pub place_id: String,
}

impl CanonicalAddress {
    pub fn is_complete(&self) -> bool {
        !self.formatted_address.is_empty() && !self.place_id.is_empty()
    }
}

/// An address stored in a user's address book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    pub id: String,
    pub user_id: String,
    pub label: Option<String>,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub country_code: Option<String>,
    pub formatted_address: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub place_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate for the address book, usually taken from a verification result
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct NewSavedAddress {
    pub label: Option<String>,
    #[validate(custom(function = "not_blank", message = "Street is required"))]
    pub street: String,
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
    pub state: Option<String>,
    #[validate(custom(function = "not_blank", message = "Postal code is required"))]
    pub postal_code: String,
    #[validate(custom(function = "not_blank", message = "Country is required"))]
    pub country: String,
    pub country_code: Option<String>,
    #[validate(custom(function = "not_blank", message = "Formatted address is required"))]
    pub formatted_address: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub place_id: Option<String>,
}

impl NewSavedAddress {
    /// Materialize the record that will be written for `user_id`.
    pub fn into_saved(self, id: String, user_id: &str, now: DateTime<Utc>) -> SavedAddress {
        SavedAddress {
            id,
            user_id: user_id.to_string(),
            label: self.label,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            country_code: self.country_code,
            formatted_address: self.formatted_address,
            latitude: self.latitude,
            longitude: self.longitude,
            place_id: self.place_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalize a label: surrounding whitespace is dropped and a blank label clears it.
pub fn normalize_label(label: Option<String>) -> Option<String> {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> CanonicalAddress {
        CanonicalAddress {
            street: "1600 Amphitheatre Parkway".into(),
            city: "Mountain View".into(),
            state: "CA".into(),
            postal_code: "94043".into(),
            country: "United States".into(),
            country_code: "US".into(),
            formatted_address: "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA".into(),
            latitude: "37.4224764".into(),
            longitude: "-122.0842499".into(),
            place_id: "ChIJ2eUgeAK6j4ARbn5u_wAGqWA".into(),
        }
    }

    fn candidate() -> NewSavedAddress {
        NewSavedAddress {
            label: Some("Work".into()),
            street: "1600 Amphitheatre Parkway".into(),
            city: "Mountain View".into(),
            state: Some("CA".into()),
            postal_code: "94043".into(),
            country: "United States".into(),
            country_code: Some("US".into()),
            formatted_address: "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA".into(),
            latitude: Some("37.4224764".into()),
            longitude: Some("-122.0842499".into()),
            place_id: None,
        }
    }

    #[test]
    fn test_into_saved_keeps_display_fields() {
        let now = Utc::now();
        let saved = candidate().into_saved("a1".into(), "alice", now);
        assert_eq!(saved.id, "a1");
        assert_eq!(saved.user_id, "alice");
        assert_eq!(saved.street, "1600 Amphitheatre Parkway");
        assert_eq!(saved.state.as_deref(), Some("CA"));
        assert_eq!(saved.label.as_deref(), Some("Work"));
        assert!(saved.place_id.is_none());
        assert_eq!(saved.created_at, now);
        assert_eq!(saved.updated_at, now);
    }

    #[test]
    fn test_blank_street_fails_validation() {
        assert!(candidate().validate().is_ok());

        let mut new = candidate();
        new.street = "  ".into();
        let errors = new.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("street"));
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label(Some("  Home ".into())).as_deref(), Some("Home"));
        assert_eq!(normalize_label(Some("   ".into())), None);
        assert_eq!(normalize_label(None), None);
    }

    #[test]
    fn test_canonical_serializes_camel_case() {
        let json = serde_json::to_value(canonical()).unwrap();
        assert_eq!(json["postalCode"], "94043");
        assert_eq!(json["countryCode"], "US");
        assert!(json.get("formattedAddress").is_some());
        assert!(json.get("placeId").is_some());
    }
}
