//! Activity log: append-only, read newest first.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{ActivityAction, ActivityLogEntry, SharedRepositoryProvider};
use crate::shared::DomainResult;

pub struct ActivityLogService {
    repos: SharedRepositoryProvider,
    page_size: u64,
}

impl ActivityLogService {
    pub fn new(repos: SharedRepositoryProvider, page_size: u64) -> Self {
        Self {
            repos,
            page_size: page_size.max(1),
        }
    }

    pub async fn record(
        &self,
        user_id: &str,
        action: ActivityAction,
        details: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> DomainResult<ActivityLogEntry> {
        let entry = ActivityLogEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            action,
            details,
            metadata: metadata.map(|m| m.to_string()),
            created_at: Utc::now(),
        };
        self.repos.activity().append(entry.clone()).await?;
        Ok(entry)
    }

    /// Most recent entries first. `limit` is clamped to `[1, page_size]`.
    pub async fn recent(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> DomainResult<Vec<ActivityLogEntry>> {
        let limit = self.clamp(limit);
        self.repos.activity().recent(user_id, limit).await
    }

    fn clamp(&self, limit: Option<u64>) -> u64 {
        limit.unwrap_or(self.page_size).clamp(1, self.page_size)
    }
}
