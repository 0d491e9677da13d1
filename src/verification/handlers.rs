//! Verification flow handlers

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{MatchOtpRequest, OtpRequestedResponse, RequestOtpRequest};
use super::services::VerificationService;
use crate::auth::cookies::session_cookie;
use crate::auth::tokens::issue_session;
use crate::common::{safe_email_log, ApiError, AppState, Validator};
use crate::services::email::verification_otp_email;

/// POST /api/auth/verify/request-otp
///
/// Issues a 5-minute OTP and emails it. Returns the user id so the
/// client can submit the match call without re-entering the email.
pub async fn request_otp_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RequestOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service = VerificationService::new(state.db.clone());

    let issued = service.request_otp(&payload.email).await?;

    // Send failure surfaces as a 500; the caller re-triggers manually.
    // The pending record stays until its TTL reclaim.
    state
        .email_service
        .send(
            &payload.email,
            "Account Verification: Notes Keep",
            &verification_otp_email(&issued.user_name, issued.code),
        )
        .await
        .map_err(|e| ApiError::EmailError(e.to_string()))?;

    info!(
        user_id = %issued.user_id,
        email = %safe_email_log(&payload.email),
        "Verification OTP dispatched"
    );

    Ok((
        StatusCode::CREATED,
        Json(OtpRequestedResponse {
            user_id: issued.user_id,
        }),
    ))
}

/// POST /api/auth/verify/match-otp
///
/// A correct match flips the verification flag and logs the user in.
pub async fn match_otp_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
    Json(payload): Json<MatchOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service = VerificationService::new(state.db.clone());

    service.match_otp(&payload.user_id, payload.otp).await?;

    let token = issue_session(&payload.user_id, &state.jwt_secret)?;

    Ok((
        jar.add(session_cookie(token)),
        Json(serde_json::json!("Account verified")),
    ))
}
