//! # Notes Module
//!
//! The protected resource and its access-control layer:
//! - note CRUD gated by the session extractor
//! - one centralized ownership check for every mutation
//! - the unauthenticated shared listing

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::notes_routes;
