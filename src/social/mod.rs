//! # Social Module
//!
//! Federated-identity bridge: maps GitHub profiles onto local users.

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::social_routes;
