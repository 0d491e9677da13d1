//! Password recovery handlers

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{ChangePasswordRequest, RecoveryRequest};
use super::services::RecoveryService;
use crate::auth::cookies::session_cookie;
use crate::auth::tokens::issue_session;
use crate::common::{safe_email_log, ApiError, AppState, Validator};
use crate::services::email::recovery_link_email;

/// POST /api/auth/recover
///
/// Emails a single-use password-reset link. The `url` field must end
/// with the reset-page suffix; anything else is rejected as tampering.
pub async fn request_recovery_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RecoveryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service = RecoveryService::new(state.db.clone(), state.jwt_secret.clone());

    let issued = service.request_recovery(&payload.email).await?;

    let link = format!("{}?token={}", payload.url, issued.token);

    state
        .email_service
        .send(
            &payload.email,
            "Account Recovery: Notes Keep",
            &recovery_link_email(&issued.user_name, &link),
        )
        .await
        .map_err(|e| ApiError::EmailError(e.to_string()))?;

    info!(
        user_id = %issued.user_id,
        email = %safe_email_log(&payload.email),
        "Recovery mail dispatched"
    );

    Ok((StatusCode::CREATED, Json(serde_json::json!("Mail has been sent"))))
}

/// POST /api/auth/recover/change-pass
///
/// Redeems the token, stores the new password, and logs the user in.
pub async fn change_password_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service = RecoveryService::new(state.db.clone(), state.jwt_secret.clone());

    let user_id = service
        .complete_recovery(&payload.token, &payload.password)
        .await?;

    let token = issue_session(&user_id, &state.jwt_secret)?;

    Ok((
        jar.add(session_cookie(token)),
        Json(serde_json::json!("Password Changed")),
    ))
}
