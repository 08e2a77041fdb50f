//! Postal addressing conventions per country

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalFormat {
    /// ISO 3166-1 alpha-2
    pub country_code: &'static str,
    pub country: &'static str,
    /// Line template, lines separated by `\n`
    pub format: &'static str,
    pub example: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

static POSTAL_FORMATS: &[PostalFormat] = &[
    PostalFormat {
        country_code: "US",
        country: "United States",
        format: "[Name]\n[Street Address]\n[City], [State] [ZIP Code]",
        example: "John Doe\n123 Main Street\nNew York, NY 10001",
        notes: Some("ZIP+4 format (12345-6789) is optional but recommended"),
    },
    PostalFormat {
        country_code: "CA",
        country: "Canada",
        format: "[Name]\n[Street Address]\n[City] [Province] [Postal Code]\n[CANADA]",
        example: "Jane Smith\n456 Maple Ave\nToronto ON M5H 2N2\nCANADA",
        notes: Some("Postal code format: A1A 1A1 (letter-number-letter number-letter-number)"),
    },
    PostalFormat {
        country_code: "GB",
        country: "United Kingdom",
        format: "[Name]\n[Street Address]\n[City]\n[Postal Code]\n[UNITED KINGDOM]",
        example: "James Brown\n789 Oxford Street\nLondon\nW1D 1BS\nUNITED KINGDOM",
        notes: Some("Postcodes can vary in format (e.g., W1A 1AA, M1 1AE, CR2 6XH)"),
    },
    PostalFormat {
        country_code: "AU",
        country: "Australia",
        format: "[Name]\n[Street Address]\n[City] [State] [Postcode]\n[AUSTRALIA]",
        example: "Sarah Johnson\n321 George Street\nSydney NSW 2000\nAUSTRALIA",
        notes: Some("Postcode is 4 digits"),
    },
    PostalFormat {
        country_code: "DE",
        country: "Germany",
        format: "[Name]\n[Street Address]\n[Postal Code] [City]\n[GERMANY]",
        example: "Hans Mueller\nHauptstraße 123\n10115 Berlin\nGERMANY",
        notes: Some("Postal code comes before the city name"),
    },
    PostalFormat {
        country_code: "FR",
        country: "France",
        format: "[Name]\n[Street Address]\n[Postal Code] [City]\n[FRANCE]",
        example: "Marie Dubois\n45 Rue de Rivoli\n75001 Paris\nFRANCE",
        notes: Some("Postal code is 5 digits"),
    },
    PostalFormat {
        country_code: "JP",
        country: "Japan",
        format: "[Postal Code]\n[Prefecture] [City]\n[Street Address]\n[Name]\n[JAPAN]",
        example: "〒100-0001\nTokyo Chiyoda-ku\n1-1-1 Chiyoda\nTaro Yamada\nJAPAN",
        notes: Some("Address is written in reverse order (largest to smallest)"),
    },
];

pub fn all() -> &'static [PostalFormat] {
    POSTAL_FORMATS
}

/// Case-insensitive lookup by country code.
pub fn lookup(country_code: &str) -> Option<&'static PostalFormat> {
    let code = country_code.trim();
    POSTAL_FORMATS
        .iter()
        .find(|f| f.country_code.eq_ignore_ascii_case(code))
}
