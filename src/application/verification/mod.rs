pub mod service;

pub use service::AddressVerificationService;
