//! Database entities module

pub mod activity_log;
pub mod saved_address;
pub mod user;

pub use activity_log::Entity as ActivityLog;
pub use saved_address::Entity as SavedAddress;
pub use user::Entity as User;
