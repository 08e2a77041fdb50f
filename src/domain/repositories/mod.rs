//! Repository access for the application layer

use std::sync::Arc;

use super::account::AccountRepository;
use super::activity::ActivityLogRepository;
use super::address::SavedAddressRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let book = repos.addresses().list_for_user("user-1").await?;
///     let feed = repos.activity().recent("user-1", 50).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn addresses(&self) -> &dyn SavedAddressRepository;
    fn activity(&self) -> &dyn ActivityLogRepository;
    fn accounts(&self) -> &dyn AccountRepository;
}

pub type SharedRepositoryProvider = Arc<dyn RepositoryProvider>;
