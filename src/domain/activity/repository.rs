//! Activity log repository interface

use async_trait::async_trait;

use super::ActivityLogEntry;
use crate::shared::DomainResult;

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, entry: ActivityLogEntry) -> DomainResult<()>;

    /// Newest first, at most `limit` entries.
    async fn recent(&self, user_id: &str, limit: u64) -> DomainResult<Vec<ActivityLogEntry>>;
}
