use thiserror::Error;

/// Errors produced by a geocoding provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The provider answered but had no match ("ZERO_RESULTS", empty feature list)
    #[error("No results")]
    NotFound,

    /// Non-success provider status, transport failure or unreadable payload
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials or unusable provider settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    /// Whether the caller may see the message verbatim.
    ///
    /// Database failures carry driver detail and are replaced by a generic
    /// message at the HTTP boundary.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Database(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Database(format!("Serialization error: {}", e))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
