pub mod service;

pub use service::AddressBookService;
