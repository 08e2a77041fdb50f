//! SeaORM implementation of ActivityLogRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{ActivityLogEntry, ActivityLogRepository, DomainResult};
use crate::infrastructure::database::entities::activity_log;

pub struct SeaOrmActivityLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmActivityLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<activity_log::Model> for ActivityLogEntry {
    fn from(m: activity_log::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            action: m.action.into(),
            details: m.details,
            metadata: m.metadata,
            created_at: m.created_at,
        }
    }
}

#[async_trait]
impl ActivityLogRepository for SeaOrmActivityLogRepository {
    async fn append(&self, entry: ActivityLogEntry) -> DomainResult<()> {
        let active = activity_log::ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id),
            action: Set(entry.action.into()),
            details: Set(entry.details),
            metadata: Set(entry.metadata),
            created_at: Set(entry.created_at),
        };
        active.insert(&self.db).await?;
        Ok(())
    }

    async fn recent(&self, user_id: &str, limit: u64) -> DomainResult<Vec<ActivityLogEntry>> {
        let rows = activity_log::Entity::find()
            .filter(activity_log::Column::UserId.eq(user_id))
            .order_by_desc(activity_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ActivityLogEntry::from).collect())
    }
}
