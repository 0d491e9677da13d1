//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/manual/login` - Email + password login
/// - `POST /api/auth/manual/register` - Account creation
/// - `POST /api/auth/logout` - Clear the session cookie
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/manual/login", post(handlers::login_handler))
        .route("/api/auth/manual/register", post(handlers::register_handler))
        .route("/api/auth/logout", post(handlers::logout_handler))
}
