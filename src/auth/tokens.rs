//! Session credential issuance and verification
//!
//! Sessions are stateless HS256 tokens: no store is consulted on
//! verification, so a credential stays valid until its embedded expiry
//! even if the account changes underneath it.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};

use super::models::Claims;
use crate::common::ApiError;

/// Fixed session lifetime
pub const SESSION_TTL_HOURS: i64 = 24;

/// Issue a signed session token for the given user, valid 24h from now
pub fn issue_session(user_id: &str, secret: &str) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "JWT encoding error during session issuance");
        ApiError::InternalServer("jwt error".to_string())
    })
}

/// Resolve a session token to a user id.
///
/// Malformed structure, signature mismatch, and expiry all yield `None`;
/// callers cannot distinguish the failure kinds. The distinction exists
/// only in the logs.
pub fn verify_session(token: &str, secret: &str) -> Option<String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims.sub),
        Err(e) => {
            warn!(error = %e, "Session token rejected");
            None
        }
    }
}
