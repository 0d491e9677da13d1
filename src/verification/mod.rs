//! # Verification Module
//!
//! One-time-passcode account verification:
//! - OTP issuance with a hard one-live-record-per-user rule
//! - code matching, verification flag flip, and explicit record invalidation

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::verification_routes;
