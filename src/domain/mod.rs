pub mod account;
pub mod activity;
pub mod address;
pub mod geocoding;
pub mod postal_format;
pub mod repositories;

// Re-export commonly used types
pub use account::{AccountDeletion, AccountRepository};
pub use activity::{ActivityAction, ActivityLogEntry, ActivityLogRepository};
pub use address::{CanonicalAddress, NewSavedAddress, SavedAddress, SavedAddressRepository};
pub use geocoding::{Coordinates, GeocodingProvider, SharedGeocodingProvider};
pub use postal_format::PostalFormat;
pub use repositories::{RepositoryProvider, SharedRepositoryProvider};

pub use crate::shared::errors::{DomainError, DomainResult, GeocodeError};
