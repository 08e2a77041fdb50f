//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod account_repository;
pub mod activity_log_repository;
pub mod repository_provider;
pub mod saved_address_repository;

pub use account_repository::SeaOrmAccountRepository;
pub use activity_log_repository::SeaOrmActivityLogRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use saved_address_repository::SeaOrmSavedAddressRepository;
