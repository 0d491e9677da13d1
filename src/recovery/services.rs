//! Recovery token issuance and single-use redemption
//!
//! The token itself is a signed, stateless payload, but its validity is
//! gated by equality against the row in `recovery_tokens`. Redemption
//! deletes the row, so the token dies with the password change even
//! though the signature stays verifiable.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::RecoveryClaims;
use crate::auth::password::hash_password;
use crate::common::{now_rfc3339, safe_token_log, ApiError};

/// Issued token plus the delivery details the handler needs
#[derive(Debug)]
pub struct IssuedRecovery {
    pub user_id: String,
    pub user_name: String,
    pub token: String,
}

pub struct RecoveryService {
    db: SqlitePool,
    jwt_secret: String,
}

impl RecoveryService {
    pub fn new(db: SqlitePool, jwt_secret: String) -> Self {
        Self { db, jwt_secret }
    }

    /// Create a recovery token for the account behind `email` and store
    /// it, overwriting any prior token. The old link silently dies.
    pub async fn request_recovery(&self, email: &str) -> Result<IssuedRecovery, ApiError> {
        let user: Option<(String, String, String)> =
            sqlx::query_as("SELECT id, name, created_at FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        let (user_id, user_name, created_at) = match user {
            Some(u) => u,
            None => return Err(ApiError::BadRequest("Invalid email".to_string())),
        };

        // Fresh iat + nonce per request: the new token never collides
        // with the one it replaces
        let claims = RecoveryClaims {
            sub: user_id.clone(),
            created_at,
            iat: Utc::now().timestamp(),
            jti: format!("{:016x}", rand::thread_rng().gen::<u64>()),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| ApiError::InternalServer("jwt error".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO recovery_tokens (user_id, token, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                token = excluded.token,
                created_at = excluded.created_at
            "#,
        )
        .bind(&user_id)
        .bind(&token)
        .bind(now_rfc3339())
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(
            user_id = %user_id,
            token = %safe_token_log(&token),
            "Recovery token issued"
        );

        Ok(IssuedRecovery {
            user_id,
            user_name,
            token,
        })
    }

    /// Redeem a recovery token: change the password and burn the token.
    ///
    /// Valid iff a stored row matches the submitted token exactly. The
    /// signature decode is defense-in-depth only; the equality check is
    /// what authorizes the change.
    pub async fn complete_recovery(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM recovery_tokens WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        let (user_id,) = match row {
            Some(r) => r,
            None => {
                warn!(token = %safe_token_log(token), "Recovery failed: token not live");
                return Err(ApiError::BadRequest("Invalid token".to_string()));
            }
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = Default::default();

        if decode::<RecoveryClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .is_err()
        {
            warn!(user_id = %user_id, "Recovery failed: stored token has a bad signature");
            return Err(ApiError::BadRequest("Invalid token".to_string()));
        }

        let password_hash = hash_password(new_password)?;

        let mut tx = self.db.begin().await.map_err(ApiError::DatabaseError)?;

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(now_rfc3339())
            .bind(&user_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        sqlx::query("DELETE FROM recovery_tokens WHERE user_id = ?")
            .bind(&user_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        tx.commit().await.map_err(ApiError::DatabaseError)?;

        info!(user_id = %user_id, "Password changed via recovery token");

        Ok(user_id)
    }
}
