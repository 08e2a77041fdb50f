//! Account data owned by this service

pub mod repository;

pub use repository::{AccountDeletion, AccountRepository};
