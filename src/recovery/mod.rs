//! # Recovery Module
//!
//! Single-use password recovery:
//! - signed token embedded in an out-of-band link
//! - validity gated by the recovery_tokens store, burned on use

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::recovery_routes;
