//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::cookies::AUTH_COOKIE;
use super::models::User;
use super::tokens::verify_session;
use crate::common::{safe_email_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Resolves the session cookie to a user record before any protected
/// handler runs. Every failure mode (missing cookie, bad token, unknown
/// user) surfaces as the same generic Unauthorized rejection.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
    pub is_verified: bool,
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let jar = CookieJar::from_headers(&parts.headers);
        let token = match jar.get(AUTH_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => {
                warn!("Authentication failed: missing session cookie");
                return Err(unauthorized());
            }
        };

        let user_id = match verify_session(&token, &app_state.jwt_secret) {
            Some(id) => id,
            None => return Err(unauthorized()),
        };

        let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&user_id)
            .fetch_optional(&app_state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    user_id = %user_id,
                    "Database error during user lookup in authentication"
                );
                ApiError::DatabaseError(e)
            })?;

        match user {
            Some(u) => {
                debug!(
                    user_id = %u.id,
                    email = %safe_email_log(&u.email),
                    "Session resolved via extractor"
                );
                Ok(AuthedUser {
                    id: u.id,
                    email: u.email,
                    is_verified: u.is_verified != 0,
                })
            }
            None => {
                warn!(user_id = %user_id, "Authentication failed: user not found in database");
                Err(unauthorized())
            }
        }
    }
}
