//! HTTP REST API interfaces
//!
//! - `common`: Error mapping and the validating JSON extractor
//! - `modules`: Handlers, DTOs and middleware per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext, ApiDoc};
