//! Address aggregate
//!
//! Canonical (verified) addresses, address book records and the repository interface.

pub mod model;
pub mod repository;

pub use model::{normalize_label, CanonicalAddress, NewSavedAddress, SavedAddress};
pub use repository::SavedAddressRepository;
