//! Activity log aggregate

pub mod model;
pub mod repository;

pub use model::{ActivityAction, ActivityLogEntry};
pub use repository::ActivityLogRepository;
