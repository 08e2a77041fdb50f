//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    AccountRepository, ActivityLogRepository, RepositoryProvider, SavedAddressRepository,
};

use super::account_repository::SeaOrmAccountRepository;
use super::activity_log_repository::SeaOrmActivityLogRepository;
use super::saved_address_repository::SeaOrmSavedAddressRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    addresses: SeaOrmSavedAddressRepository,
    activity: SeaOrmActivityLogRepository,
    accounts: SeaOrmAccountRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            addresses: SeaOrmSavedAddressRepository::new(db.clone()),
            activity: SeaOrmActivityLogRepository::new(db.clone()),
            accounts: SeaOrmAccountRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn addresses(&self) -> &dyn SavedAddressRepository {
        &self.addresses
    }

    fn activity(&self) -> &dyn ActivityLogRepository {
        &self.activity
    }

    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }
}
