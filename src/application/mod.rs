//! Application services
//!
//! HTTP handlers are thin wrappers that delegate here.

pub mod account;
pub mod activity;
pub mod address_book;
pub mod verification;

pub use account::AccountService;
pub use activity::ActivityLogService;
pub use address_book::AddressBookService;
pub use verification::AddressVerificationService;
