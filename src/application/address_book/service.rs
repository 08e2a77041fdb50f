//! Personal address book
//!
//! Every operation is scoped by the caller's user id, and every mutation
//! appends an activity entry once the write has succeeded.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::application::activity::ActivityLogService;
use crate::domain::address::normalize_label;
use crate::domain::{ActivityAction, NewSavedAddress, SavedAddress, SharedRepositoryProvider};
use crate::shared::{first_validation_message, DomainError, DomainResult};

const NOT_FOUND: &str = "Address not found";

pub struct AddressBookService {
    repos: SharedRepositoryProvider,
    activity: Arc<ActivityLogService>,
}

impl AddressBookService {
    pub fn new(repos: SharedRepositoryProvider, activity: Arc<ActivityLogService>) -> Self {
        Self { repos, activity }
    }

    /// Oldest first.
    pub async fn list(&self, user_id: &str) -> DomainResult<Vec<SavedAddress>> {
        self.repos.addresses().list_for_user(user_id).await
    }

    /// Validates the candidate before touching storage.
    pub async fn save(
        &self,
        user_id: &str,
        mut candidate: NewSavedAddress,
    ) -> DomainResult<SavedAddress> {
        candidate
            .validate()
            .map_err(|e| DomainError::Validation(first_validation_message(&e)))?;
        candidate.label = normalize_label(candidate.label.take());

        let record = candidate.into_saved(Uuid::new_v4().to_string(), user_id, Utc::now());
        let saved = self.repos.addresses().insert(record).await?;

        self.activity
            .record(
                user_id,
                ActivityAction::AddressSaved,
                Some(format!("Saved address: {}", saved.formatted_address)),
                Some(json!({ "addressId": saved.id })),
            )
            .await?;

        info!(user_id, address_id = %saved.id, "Address saved");
        Ok(saved)
    }

    /// A blank label clears it.
    pub async fn update_label(
        &self,
        user_id: &str,
        address_id: &str,
        label: Option<String>,
    ) -> DomainResult<SavedAddress> {
        let label = normalize_label(label);

        let updated = self
            .repos
            .addresses()
            .update_label(user_id, address_id, label.clone(), Utc::now())
            .await?
            .ok_or_else(|| DomainError::NotFound(NOT_FOUND.into()))?;

        self.activity
            .record(
                user_id,
                ActivityAction::AddressUpdated,
                Some(format!(
                    "Updated address label: {}",
                    label.as_deref().unwrap_or_default()
                )),
                Some(json!({ "addressId": updated.id })),
            )
            .await?;

        info!(user_id, address_id, "Address label updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, address_id: &str) -> DomainResult<()> {
        let removed = self
            .repos
            .addresses()
            .delete(user_id, address_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(NOT_FOUND.into()))?;

        self.activity
            .record(
                user_id,
                ActivityAction::AddressDeleted,
                Some(format!("Deleted address: {}", removed.formatted_address)),
                Some(json!({ "addressId": removed.id })),
            )
            .await?;

        info!(user_id, address_id, "Address deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::database::testing::{insert_user, memory_db};
    use crate::infrastructure::database::SeaOrmRepositoryProvider;

    async fn services() -> (AddressBookService, Arc<ActivityLogService>) {
        let db = memory_db().await;
        insert_user(&db, "alice").await;
        insert_user(&db, "bob").await;
        let repos: SharedRepositoryProvider = Arc::new(SeaOrmRepositoryProvider::new(db));
        let activity = Arc::new(ActivityLogService::new(repos.clone(), 50));
        (AddressBookService::new(repos, activity.clone()), activity)
    }

    fn candidate() -> NewSavedAddress {
        NewSavedAddress {
            label: Some("  Office ".into()),
            street: "1600 Amphitheatre Parkway".into(),
            city: "Mountain View".into(),
            state: Some("CA".into()),
            postal_code: "94043".into(),
            country: "United States".into(),
            country_code: Some("US".into()),
            formatted_address: "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA".into(),
            latitude: Some("37.4224764".into()),
            longitude: Some("-122.0842499".into()),
            place_id: Some("ChIJ2eUgeAK6j4ARbn5u_wAGqWA".into()),
        }
    }

    #[tokio::test]
    async fn test_save_then_list_round_trip() {
        let (book, activity) = services().await;
        let saved = book.save("alice", candidate()).await.unwrap();
        assert_eq!(saved.label.as_deref(), Some("Office"));

        let listed = book.list("alice").await.unwrap();
        assert_eq!(listed, vec![saved.clone()]);
        assert_eq!(listed[0].street, "1600 Amphitheatre Parkway");
        assert_eq!(listed[0].postal_code, "94043");

        // Reads are repeatable.
        assert_eq!(book.list("alice").await.unwrap(), listed);

        let feed = activity.recent("alice", None).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].action, ActivityAction::AddressSaved);
        assert_eq!(
            feed[0].details.as_deref(),
            Some("Saved address: 1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA")
        );
        let metadata: serde_json::Value =
            serde_json::from_str(feed[0].metadata.as_deref().unwrap()).unwrap();
        assert_eq!(metadata, json!({ "addressId": saved.id }));
    }

    #[tokio::test]
    async fn test_empty_street_fails_before_storage() {
        let (book, activity) = services().await;
        let mut bad = candidate();
        bad.street = String::new();

        let err = book.save("alice", bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Street is required"));
        assert!(book.list("alice").await.unwrap().is_empty());
        assert!(activity.recent("alice", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_label() {
        let (book, activity) = services().await;
        let saved = book.save("alice", candidate()).await.unwrap();

        let updated = book
            .update_label("alice", &saved.id, Some("HQ".into()))
            .await
            .unwrap();
        assert_eq!(updated.label.as_deref(), Some("HQ"));

        let cleared = book
            .update_label("alice", &saved.id, Some("   ".into()))
            .await
            .unwrap();
        assert_eq!(cleared.label, None);

        let feed = activity.recent("alice", None).await.unwrap();
        assert!(feed
            .iter()
            .any(|e| e.action == ActivityAction::AddressUpdated
                && e.details.as_deref() == Some("Updated address label: HQ")));
    }

    #[tokio::test]
    async fn test_other_users_address_is_not_found() {
        let (book, activity) = services().await;
        let saved = book.save("alice", candidate()).await.unwrap();

        let err = book
            .update_label("bob", &saved.id, Some("Stolen".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(msg) if msg == "Address not found"));

        let err = book.delete("bob", &saved.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        assert_eq!(book.list("alice").await.unwrap().len(), 1);
        assert_eq!(book.list("alice").await.unwrap()[0].label.as_deref(), Some("Office"));
        assert!(activity.recent("bob", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_records_formatted_address() {
        let (book, activity) = services().await;
        let saved = book.save("alice", candidate()).await.unwrap();

        book.delete("alice", &saved.id).await.unwrap();

        assert!(book.list("alice").await.unwrap().is_empty());
        let feed = activity.recent("alice", None).await.unwrap();
        let deleted = feed
            .iter()
            .find(|e| e.action == ActivityAction::AddressDeleted)
            .unwrap();
        assert!(deleted
            .details
            .as_deref()
            .unwrap()
            .contains("1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA"));

        let err = book.delete("alice", &saved.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
