pub mod account;
pub mod activity;
pub mod addresses;
pub mod health;
pub mod metrics;
pub mod postal_formats;
pub mod request_id;
