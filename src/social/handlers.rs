//! Federated login handlers
//!
//! GitHub is an external trust boundary: we exchange the callback code
//! for an access token, read the profile, and map it onto a User record.
//! Federated accounts are auto-verified and carry no local password.

use axum::extract::{Extension, Query};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::models::{GithubCallbackQuery, GithubProfile, GithubTokenResponse};
use crate::auth::cookies::session_cookie;
use crate::auth::models::User;
use crate::auth::tokens::issue_session;
use crate::common::{generate_user_id, now_rfc3339, safe_email_log, ApiError, AppState};
use axum_extra::extract::cookie::CookieJar;

const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";

/// GET /api/auth/social/github/callback
///
/// Handles the OAuth callback from GitHub and logs the mapped user in.
pub async fn github_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Query(params): Query<GithubCallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(provider_error) = params.error {
        warn!(oauth_error = %provider_error, "GitHub OAuth returned error");
        return Err(ApiError::BadRequest("GitHub authorization failed".to_string()));
    }

    let code = params
        .code
        .ok_or_else(|| ApiError::BadRequest("No authorization code provided".to_string()))?;

    let state = state_lock.read().await.clone();

    let (client_id, client_secret) = match (&state.github_client_id, &state.github_client_secret) {
        (Some(id), Some(secret)) => (id.clone(), secret.clone()),
        _ => {
            error!("GitHub OAuth credentials not configured");
            return Err(ApiError::InternalServer(
                "github login unavailable".to_string(),
            ));
        }
    };

    let profile = fetch_github_profile(&state, &client_id, &client_secret, &code).await?;

    debug!(
        provider = "github",
        provider_id = %profile.id,
        login = %profile.login,
        "GitHub profile fetched, proceeding with user lookup"
    );

    let user = find_or_create_user(&state, &profile).await?;

    let token = issue_session(&user.id, &state.jwt_secret)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        provider = "github",
        "User authentication successful via GitHub"
    );

    Ok((
        jar.add(session_cookie(token)),
        Json(serde_json::json!("Login Success")),
    ))
}

async fn fetch_github_profile(
    state: &AppState,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<GithubProfile, ApiError> {
    let token_resp = state
        .http
        .post(GITHUB_TOKEN_URL)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&serde_json::json!({
            "client_id": client_id,
            "client_secret": client_secret,
            "code": code,
        }))
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, endpoint = GITHUB_TOKEN_URL, "HTTP error contacting GitHub");
            ApiError::InternalServer("github token exchange unavailable".to_string())
        })?
        .json::<GithubTokenResponse>()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to parse GitHub token response");
            ApiError::InternalServer("github token exchange failed".to_string())
        })?;

    let access_token = token_resp.access_token.ok_or_else(|| {
        warn!("GitHub did not return an access token for the supplied code");
        ApiError::BadRequest("invalid authorization code".to_string())
    })?;

    state
        .http
        .get(GITHUB_USER_URL)
        .bearer_auth(&access_token)
        .header(reqwest::header::USER_AGENT, "notes-api")
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, endpoint = GITHUB_USER_URL, "HTTP error fetching GitHub profile");
            ApiError::InternalServer("github profile fetch unavailable".to_string())
        })?
        .json::<GithubProfile>()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to parse GitHub profile response");
            ApiError::InternalServer("github profile fetch failed".to_string())
        })
}

async fn find_or_create_user(state: &AppState, profile: &GithubProfile) -> Result<User, ApiError> {
    let provider_id = profile.id.to_string();

    let existing: Option<User> = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE provider = ? AND provider_id = ?",
    )
    .bind("github")
    .bind(&provider_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if let Some(user) = existing {
        return Ok(user);
    }

    let id = generate_user_id();
    let name = profile
        .name
        .clone()
        .unwrap_or_else(|| profile.login.clone());
    // GitHub may withhold the email; fall back to a provider-scoped marker
    let email = profile
        .email
        .clone()
        .unwrap_or_else(|| format!("github-id: {}", provider_id));
    let now = now_rfc3339();

    info!(
        user_id = %id,
        email = %safe_email_log(&email),
        provider = "github",
        "Creating new user account via GitHub"
    );

    // password_hash stays NULL: federated accounts have no local password
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users
            (id, name, email, password_hash, is_verified, picture, provider, provider_id,
             created_at, updated_at)
        VALUES (?, ?, ?, NULL, 1, ?, 'github', ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&email)
    .bind(profile.avatar_url.as_deref())
    .bind(&provider_id)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    // Fetch back by provider key: a concurrent callback may have won the insert
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE provider = ? AND provider_id = ?")
        .bind("github")
        .bind(&provider_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)
}
