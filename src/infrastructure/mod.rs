//! Infrastructure layer - external concerns

pub mod database;
pub mod geocoding;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use geocoding::build_provider;
