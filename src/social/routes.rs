//! Federated login routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the social login router
///
/// # Routes
/// - `GET /api/auth/social/github/callback` - GitHub OAuth callback
pub fn social_routes() -> Router {
    Router::new().route(
        "/api/auth/social/github/callback",
        get(handlers::github_callback),
    )
}
