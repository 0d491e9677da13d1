//! Verification routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the verification router
///
/// # Routes
/// - `POST /api/auth/verify/request-otp` - Issue and email an OTP
/// - `POST /api/auth/verify/match-otp` - Match the code and verify the account
pub fn verification_routes() -> Router {
    Router::new()
        .route(
            "/api/auth/verify/request-otp",
            post(handlers::request_otp_handler),
        )
        .route(
            "/api/auth/verify/match-otp",
            post(handlers::match_otp_handler),
        )
}
