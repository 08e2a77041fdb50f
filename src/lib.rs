//! # Address Utility
//!
//! Address verification, reverse geocoding and a personal address book.
//!
//! ## Architecture
//!
//! - **domain**: Core entities, repository traits and the geocoding capability
//! - **application**: Verification, address book, activity log and account services
//! - **infrastructure**: SeaORM storage and the Google / Mapbox geocoding adapters
//! - **auth**: Session resolution and the HTTP session middleware
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Bootstrap and graceful shutdown

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::{create_api_router, ApiContext};
