//! Tests for verification module
//!
//! These tests run the OTP service against an in-memory database with the
//! real schema, covering:
//! - the one-live-OTP-per-user rule and its TTL-based release
//! - match semantics: verify-once, explicit invalidation, distinct
//!   expired vs invalid-code failures

#[cfg(test)]
mod tests {
    use super::super::models;
    use super::super::services::{VerificationService, OTP_MAX_EXCLUSIVE, OTP_MIN_EXCLUSIVE};
    use crate::common::test_support::{insert_test_user, test_pool};
    use crate::common::Validator;
    use sqlx::SqlitePool;

    async fn is_verified(pool: &SqlitePool, user_id: &str) -> bool {
        let (flag,): (i64,) = sqlx::query_as("SELECT is_verified FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .expect("user lookup failed");
        flag != 0
    }

    async fn expire_otp(pool: &SqlitePool, user_id: &str) {
        sqlx::query("UPDATE otps SET expires_at = '2000-01-01T00:00:00Z' WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await
            .expect("failed to backdate otp");
    }

    #[tokio::test]
    async fn test_request_otp_unknown_email_rejected() {
        let pool = test_pool().await;
        let service = VerificationService::new(pool.clone());

        let err = service.request_otp("ghost@x.com").await.unwrap_err();
        assert!(err.to_string().contains("No account with this email"));
    }

    #[tokio::test]
    async fn test_second_request_rejected_while_live() {
        let pool = test_pool().await;
        let user_id = insert_test_user(&pool, "a@x.com", "hash").await;
        let service = VerificationService::new(pool.clone());

        let issued = service.request_otp("a@x.com").await.expect("first issue");
        assert_eq!(issued.user_id, user_id);
        assert!(issued.code > OTP_MIN_EXCLUSIVE && issued.code < OTP_MAX_EXCLUSIVE);

        let err = service.request_otp("a@x.com").await.unwrap_err();
        assert!(err.to_string().contains("already pending"));
    }

    #[tokio::test]
    async fn test_request_succeeds_after_expiry() {
        let pool = test_pool().await;
        let user_id = insert_test_user(&pool, "a@x.com", "hash").await;
        let service = VerificationService::new(pool.clone());

        let first = service.request_otp("a@x.com").await.expect("first issue");
        expire_otp(&pool, &user_id).await;

        let second = service.request_otp("a@x.com").await.expect("reissue");
        assert_eq!(second.user_id, user_id);
        // old record was reclaimed, this is a fresh one
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM otps WHERE user_id = ?")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .expect("count failed");
        assert_eq!(count, 1);
        let _ = first;
    }

    #[tokio::test]
    async fn test_match_wrong_code_is_invalid_otp() {
        let pool = test_pool().await;
        let user_id = insert_test_user(&pool, "a@x.com", "hash").await;
        let service = VerificationService::new(pool.clone());

        let issued = service.request_otp("a@x.com").await.expect("issue");
        let wrong = if issued.code == 123_456 { 123_457 } else { 123_456 };

        let err = service.match_otp(&user_id, wrong).await.unwrap_err();
        assert!(err.to_string().contains("Invalid OTP"));
        assert!(!is_verified(&pool, &user_id).await);
    }

    #[tokio::test]
    async fn test_match_flips_verification_exactly_once() {
        let pool = test_pool().await;
        let user_id = insert_test_user(&pool, "a@x.com", "hash").await;
        let service = VerificationService::new(pool.clone());

        let issued = service.request_otp("a@x.com").await.expect("issue");
        service
            .match_otp(&user_id, issued.code)
            .await
            .expect("match");
        assert!(is_verified(&pool, &user_id).await);

        // The record was invalidated on match: a replay reports the
        // expired kind, not invalid-code
        let err = service.match_otp(&user_id, issued.code).await.unwrap_err();
        assert!(err.to_string().contains("Previous OTP expired"));
    }

    #[tokio::test]
    async fn test_match_expired_record_reports_expired() {
        let pool = test_pool().await;
        let user_id = insert_test_user(&pool, "a@x.com", "hash").await;
        let service = VerificationService::new(pool.clone());

        let issued = service.request_otp("a@x.com").await.expect("issue");
        expire_otp(&pool, &user_id).await;

        let err = service.match_otp(&user_id, issued.code).await.unwrap_err();
        assert!(err.to_string().contains("Previous OTP expired"));
        assert!(!is_verified(&pool, &user_id).await);
    }

    #[tokio::test]
    async fn test_match_unknown_user() {
        let pool = test_pool().await;
        let service = VerificationService::new(pool.clone());

        let err = service.match_otp("U_MISSING", 123_456).await.unwrap_err();
        assert!(err.to_string().contains("Unknown user"));
    }

    #[test]
    fn test_match_request_validation_bounds() {
        // Both bounds are excluded
        for (otp, ok) in [
            (100_000, false),
            (100_001, true),
            (999_998, true),
            (999_999, false),
            (12_345, false),
        ] {
            let req = models::MatchOtpRequest {
                otp,
                user_id: "U_ABC123".to_string(),
            };
            assert_eq!(req.validate(&req).is_valid, ok, "otp {}", otp);
        }
    }

    #[test]
    fn test_request_validation_email() {
        let req = models::RequestOtpRequest {
            email: "bad-email".to_string(),
        };
        assert!(!req.validate(&req).is_valid);
    }
}
