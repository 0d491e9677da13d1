//! OTP issuance and matching
//!
//! The one-live-OTP-per-user rule is the only throttle on verification
//! mail: a pending record blocks reissue until its 5-minute expiry.
//! The primary key on `otps.user_id` backs the rule at the storage layer,
//! so concurrent requests collide on the insert instead of racing.

use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::{IssuedOtp, OtpRecord};
use crate::common::{now_rfc3339, ApiError};

/// Absolute OTP lifetime
pub const OTP_TTL_MINUTES: i64 = 5;

/// Codes are strictly inside (100000, 999999)
pub const OTP_MIN_EXCLUSIVE: i64 = 100_000;
pub const OTP_MAX_EXCLUSIVE: i64 = 999_999;

pub struct VerificationService {
    db: SqlitePool,
}

impl VerificationService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Issue an OTP for the account behind `email`.
    ///
    /// Rejected when no such user exists or an unexpired OTP is still
    /// pending. Expired records are reclaimed here, not on a timer.
    pub async fn request_otp(&self, email: &str) -> Result<IssuedOtp, ApiError> {
        let user: Option<(String, String)> =
            sqlx::query_as("SELECT id, name FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        let (user_id, user_name) = match user {
            Some(u) => u,
            None => {
                return Err(ApiError::BadRequest(
                    "No account with this email".to_string(),
                ))
            }
        };

        let now = now_rfc3339();

        // Reclaim an expired record so a fresh one can take its slot
        sqlx::query("DELETE FROM otps WHERE user_id = ? AND expires_at <= ?")
            .bind(&user_id)
            .bind(&now)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        let live: Option<(i64,)> = sqlx::query_as("SELECT code FROM otps WHERE user_id = ?")
            .bind(&user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if live.is_some() {
            warn!(user_id = %user_id, "OTP request rejected: one already pending");
            return Err(ApiError::BadRequest(
                "An OTP is already pending for this account".to_string(),
            ));
        }

        let code = rand::thread_rng().gen_range((OTP_MIN_EXCLUSIVE + 1)..OTP_MAX_EXCLUSIVE);
        let expires_at = (Utc::now() + Duration::minutes(OTP_TTL_MINUTES))
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        if let Err(e) = sqlx::query(
            "INSERT INTO otps (user_id, code, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user_id)
        .bind(code)
        .bind(&now)
        .bind(&expires_at)
        .execute(&self.db)
        .await
        {
            // A concurrent request won the insert
            if e.to_string().contains("UNIQUE constraint failed") {
                return Err(ApiError::BadRequest(
                    "An OTP is already pending for this account".to_string(),
                ));
            }
            return Err(ApiError::DatabaseError(e));
        }

        info!(user_id = %user_id, "OTP issued");

        Ok(IssuedOtp {
            user_id,
            user_name,
            code,
        })
    }

    /// Match a submitted code against the stored record.
    ///
    /// A missing or expired record reports "Previous OTP expired", which
    /// the client renders differently from a code mismatch. On a match
    /// the verification flag flips and the record is deleted in the same
    /// transaction, so the code cannot be replayed before its TTL.
    pub async fn match_otp(&self, user_id: &str, code: i64) -> Result<(), ApiError> {
        let user: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if user.is_none() {
            return Err(ApiError::BadRequest("Unknown user".to_string()));
        }

        let record: Option<OtpRecord> =
            sqlx::query_as::<_, OtpRecord>("SELECT * FROM otps WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        let record = match record {
            Some(r) => r,
            None => {
                return Err(ApiError::BadRequest("Previous OTP expired".to_string()));
            }
        };

        if record.expires_at <= now_rfc3339() {
            sqlx::query("DELETE FROM otps WHERE user_id = ?")
                .bind(user_id)
                .execute(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;
            return Err(ApiError::BadRequest("Previous OTP expired".to_string()));
        }

        if record.code != code {
            warn!(user_id = %user_id, "OTP match failed: code mismatch");
            return Err(ApiError::BadRequest("Invalid OTP".to_string()));
        }

        let mut tx = self.db.begin().await.map_err(ApiError::DatabaseError)?;

        sqlx::query("UPDATE users SET is_verified = 1, updated_at = ? WHERE id = ?")
            .bind(now_rfc3339())
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        sqlx::query("DELETE FROM otps WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        tx.commit().await.map_err(ApiError::DatabaseError)?;

        info!(user_id = %user_id, "Account verified via OTP");

        Ok(())
    }
}
