//! Addresses module: verification and the personal address book

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
