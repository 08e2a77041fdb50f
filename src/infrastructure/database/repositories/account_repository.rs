//! SeaORM implementation of AccountRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};

use crate::domain::{AccountDeletion, AccountRepository, DomainResult};
use crate::infrastructure::database::entities::{activity_log, saved_address, user};

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn delete_user_cascade(&self, user_id: &str) -> DomainResult<AccountDeletion> {
        let txn = self.db.begin().await?;

        // Children first so the foreign keys never see an orphan.
        let activities = activity_log::Entity::delete_many()
            .filter(activity_log::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let addresses = saved_address::Entity::delete_many()
            .filter(saved_address::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let users = user::Entity::delete_by_id(user_id)
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        if users == 0 {
            debug!("User '{}' had no row in users table", user_id);
        }

        Ok(AccountDeletion {
            activities,
            addresses,
            user_removed: users > 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ActivityAction, ActivityLogEntry, ActivityLogRepository, NewSavedAddress,
        SavedAddressRepository,
    };
    use crate::infrastructure::database::repositories::{
        SeaOrmActivityLogRepository, SeaOrmSavedAddressRepository,
    };
    use crate::infrastructure::database::testing::{insert_user, memory_db};
    use chrono::Utc;

    #[tokio::test]
    async fn test_cascade_removes_only_that_user() {
        let db = memory_db().await;
        insert_user(&db, "alice").await;
        insert_user(&db, "bob").await;

        let addresses = SeaOrmSavedAddressRepository::new(db.clone());
        let activity = SeaOrmActivityLogRepository::new(db.clone());
        let accounts = SeaOrmAccountRepository::new(db.clone());

        for (id, owner) in [("a1", "alice"), ("a2", "alice"), ("b1", "bob")] {
            let new = NewSavedAddress {
                street: "1 Main St".into(),
                city: "Town".into(),
                postal_code: "00001".into(),
                country: "Nowhere".into(),
                formatted_address: "1 Main St, Town".into(),
                ..Default::default()
            };
            addresses
                .insert(new.into_saved(id.into(), owner, Utc::now()))
                .await
                .unwrap();
            activity
                .append(ActivityLogEntry {
                    id: format!("log-{}", id),
                    user_id: owner.into(),
                    action: ActivityAction::AddressSaved,
                    details: None,
                    metadata: None,
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        let deletion = accounts.delete_user_cascade("alice").await.unwrap();
        assert_eq!(deletion.activities, 2);
        assert_eq!(deletion.addresses, 2);
        assert!(deletion.user_removed);

        assert!(addresses.list_for_user("alice").await.unwrap().is_empty());
        assert_eq!(addresses.list_for_user("bob").await.unwrap().len(), 1);
        assert_eq!(activity.recent("bob", 50).await.unwrap().len(), 1);
        assert!(user::Entity::find_by_id("alice").one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_an_error() {
        let db = memory_db().await;
        let deletion = SeaOrmAccountRepository::new(db)
            .delete_user_cascade("ghost")
            .await
            .unwrap();
        assert_eq!(deletion, AccountDeletion::default());
    }
}
