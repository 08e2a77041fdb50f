pub mod service;

pub use service::ActivityLogService;
