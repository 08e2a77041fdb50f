//! Account repository interface

use async_trait::async_trait;

use crate::shared::DomainResult;

/// Row counts removed by an account deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountDeletion {
    pub activities: u64,
    pub addresses: u64,
    pub user_removed: bool,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Remove every record owned by `user_id`, then the user itself.
    ///
    /// Runs activity log, saved addresses, user, in that order, as one unit.
    async fn delete_user_cascade(&self, user_id: &str) -> DomainResult<AccountDeletion>;
}
