//! Account removal

use tracing::info;

use crate::domain::{AccountDeletion, SharedRepositoryProvider};
use crate::shared::DomainResult;

pub struct AccountService {
    repos: SharedRepositoryProvider,
}

impl AccountService {
    pub fn new(repos: SharedRepositoryProvider) -> Self {
        Self { repos }
    }

    /// Remove the caller's activity log, address book and user record.
    pub async fn delete_account(&self, user_id: &str) -> DomainResult<AccountDeletion> {
        let removed = self.repos.accounts().delete_user_cascade(user_id).await?;
        info!(
            user_id,
            activities = removed.activities,
            addresses = removed.addresses,
            user_removed = removed.user_removed,
            "Account deleted"
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::{ActivityLogService, AddressBookService};
    use crate::domain::NewSavedAddress;
    use crate::infrastructure::database::testing::{insert_user, memory_db};
    use crate::infrastructure::database::SeaOrmRepositoryProvider;

    #[tokio::test]
    async fn test_delete_account_removes_everything() {
        let db = memory_db().await;
        insert_user(&db, "alice").await;
        let repos: SharedRepositoryProvider = Arc::new(SeaOrmRepositoryProvider::new(db));
        let activity = Arc::new(ActivityLogService::new(repos.clone(), 50));
        let book = AddressBookService::new(repos.clone(), activity.clone());
        let accounts = AccountService::new(repos);

        book.save(
            "alice",
            NewSavedAddress {
                street: "10 Downing Street".into(),
                city: "London".into(),
                postal_code: "SW1A 2AA".into(),
                country: "United Kingdom".into(),
                formatted_address: "10 Downing St, London SW1A 2AA, UK".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let removed = accounts.delete_account("alice").await.unwrap();
        assert_eq!(
            removed,
            AccountDeletion {
                activities: 1,
                addresses: 1,
                user_removed: true,
            }
        );
        assert!(book.list("alice").await.unwrap().is_empty());
        assert!(activity.recent("alice", None).await.unwrap().is_empty());
    }
}
