//! Authentication handlers

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::cookies::{clear_session_cookie, session_cookie};
use super::models::{LoginRequest, RegisterRequest, User};
use super::password::{hash_password, verify_password};
use super::tokens::issue_session;
use crate::common::{generate_user_id, now_rfc3339, safe_email_log, ApiError, AppState, Validator};

/// POST /api/auth/manual/login
///
/// # Request Body
/// ```json
/// {
///   "email": "a@x.com",
///   "password": "secret1"
/// }
/// ```
///
/// Sets the session cookie on success.
pub async fn login_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = match user {
        Some(u) => u,
        None => {
            warn!(
                email = %safe_email_log(&payload.email),
                "Login failed: no user with this email"
            );
            return Err(ApiError::BadRequest("User not found".to_string()));
        }
    };

    // Federated accounts carry no local hash and never match
    let matched = match user.password_hash.as_deref() {
        Some(hash) => verify_password(&payload.password, hash)?,
        None => false,
    };

    if !matched {
        warn!(user_id = %user.id, "Login failed: password mismatch");
        return Err(ApiError::BadRequest("Invalid Password".to_string()));
    }

    let token = issue_session(&user.id, &state.jwt_secret)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User login successful"
    );

    Ok((
        jar.add(session_cookie(token)),
        Json(serde_json::json!("Login Success")),
    ))
}

/// POST /api/auth/manual/register
///
/// # Request Body
/// ```json
/// {
///   "email": "a@x.com",
///   "password": "secret1",
///   "name": "Ann"
/// }
/// ```
///
/// Creates the account unverified and logs the user straight in.
pub async fn register_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        return Err(ApiError::BadRequest(
            "User with this email already exist".to_string(),
        ));
    }

    let id = generate_user_id();
    let password_hash = hash_password(&payload.password)?;
    let now = now_rfc3339();

    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, is_verified, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(payload.name.trim())
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    {
        // Concurrent registration can still lose the race to the unique index
        if e.to_string().contains("UNIQUE constraint failed") {
            return Err(ApiError::BadRequest(
                "User with this email already exist".to_string(),
            ));
        }
        error!(
            error = %e,
            email = %safe_email_log(&payload.email),
            "Database error inserting new user during registration"
        );
        return Err(ApiError::DatabaseError(e));
    }

    let token = issue_session(&id, &state.jwt_secret)?;

    info!(
        user_id = %id,
        email = %safe_email_log(&payload.email),
        "New user account created"
    );

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(serde_json::json!("Register Success")),
    ))
}

/// POST /api/auth/logout
///
/// Sessions are stateless, so logout just clears the client-side cookie.
pub async fn logout_handler(jar: CookieJar) -> Result<impl IntoResponse, ApiError> {
    info!("User logout");
    Ok((
        jar.add(clear_session_cookie()),
        Json(serde_json::json!("Logout successful")),
    ))
}
