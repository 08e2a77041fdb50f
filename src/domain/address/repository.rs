//! Saved address repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::SavedAddress;
use crate::shared::DomainResult;

/// Persistence for address books.
///
/// Every lookup and mutation is scoped by `user_id`: a record owned by
/// someone else behaves exactly like a missing one.
#[async_trait]
pub trait SavedAddressRepository: Send + Sync {
    /// All addresses of `user_id`, oldest first.
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<SavedAddress>>;

    async fn insert(&self, address: SavedAddress) -> DomainResult<SavedAddress>;

    /// Set the label of `(id, user_id)`. `None` when no such address exists.
    async fn update_label(
        &self,
        user_id: &str,
        id: &str,
        label: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Option<SavedAddress>>;

    /// Remove `(id, user_id)` and return the record as it was before deletion.
    async fn delete(&self, user_id: &str, id: &str) -> DomainResult<Option<SavedAddress>>;
}
