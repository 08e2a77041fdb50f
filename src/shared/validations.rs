use validator::{ValidationError, ValidationErrors};

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Form fields in the order they appear on the address forms.
const FIELD_ORDER: &[&str] = &[
    "address",
    "latitude",
    "longitude",
    "label",
    "street",
    "city",
    "state",
    "postal_code",
    "country",
    "formatted_address",
];

/// Picks a single human-readable message out of a validation failure.
///
/// Known fields are visited in form order; anything else follows in name
/// order, so the same input always yields the same message.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&str> = field_errors.keys().map(|k| &**k).collect();
    fields.sort_by_key(|field| {
        let rank = FIELD_ORDER
            .iter()
            .position(|known| known == field)
            .unwrap_or(FIELD_ORDER.len());
        (rank, *field)
    });

    fields
        .into_iter()
        .find_map(|field| {
            field_errors.get(field)?.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code))
            })
        })
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "not_blank", message = "Street is required"))]
        street: String,
        #[validate(custom(function = "not_blank", message = "City is required"))]
        city: String,
        #[validate(custom(function = "not_blank", message = "Zone is required"))]
        zone: String,
        #[validate(custom(function = "not_blank", message = "Area is required"))]
        area: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Main St").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   \t").is_err());
    }

    #[test]
    fn test_first_message_follows_form_order() {
        let form = Form {
            street: String::new(),
            city: " ".to_string(),
            zone: String::new(),
            area: String::new(),
        };
        let errors = form.validate().unwrap_err();
        for _ in 0..5 {
            assert_eq!(first_validation_message(&errors), "Street is required");
        }
    }

    #[test]
    fn test_unknown_fields_follow_in_name_order() {
        let form = Form {
            street: "Main St".to_string(),
            city: "Springfield".to_string(),
            zone: String::new(),
            area: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Area is required");
    }

    #[test]
    fn test_single_field_message() {
        let form = Form {
            street: String::new(),
            city: "Springfield".to_string(),
            zone: "North".to_string(),
            area: "Downtown".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Street is required");
    }
}
