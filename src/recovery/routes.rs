//! Password recovery routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the recovery router
///
/// # Routes
/// - `POST /api/auth/recover` - Email a single-use reset link
/// - `POST /api/auth/recover/change-pass` - Redeem the token and change the password
pub fn recovery_routes() -> Router {
    Router::new()
        .route("/api/auth/recover", post(handlers::request_recovery_handler))
        .route(
            "/api/auth/recover/change-pass",
            post(handlers::change_password_handler),
        )
}
