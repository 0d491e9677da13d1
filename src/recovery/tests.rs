//! Tests for recovery module
//!
//! Service tests against an in-memory database covering:
//! - single-use redemption (token dies with the password change)
//! - overwrite-on-new-request semantics
//! - the reset-page URL allow-list

#[cfg(test)]
mod tests {
    use super::super::models;
    use super::super::services::RecoveryService;
    use crate::auth::password::{hash_password, verify_password};
    use crate::common::test_support::{insert_test_user, test_pool};
    use crate::common::Validator;
    use sqlx::SqlitePool;

    const SECRET: &str = "test_secret_key";

    async fn stored_hash(pool: &SqlitePool, user_id: &str) -> String {
        let (hash,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .expect("user lookup failed");
        hash
    }

    #[tokio::test]
    async fn test_request_unknown_email_rejected() {
        let pool = test_pool().await;
        let service = RecoveryService::new(pool.clone(), SECRET.to_string());

        let err = service.request_recovery("ghost@x.com").await.unwrap_err();
        assert!(err.to_string().contains("Invalid email"));
    }

    #[tokio::test]
    async fn test_complete_recovery_changes_password_and_burns_token() {
        let pool = test_pool().await;
        let old_hash = hash_password("old-password").expect("hash");
        let user_id = insert_test_user(&pool, "a@x.com", &old_hash).await;
        let service = RecoveryService::new(pool.clone(), SECRET.to_string());

        let issued = service.request_recovery("a@x.com").await.expect("request");
        assert_eq!(issued.user_id, user_id);

        let changed_id = service
            .complete_recovery(&issued.token, "new-password")
            .await
            .expect("complete");
        assert_eq!(changed_id, user_id);

        let hash = stored_hash(&pool, &user_id).await;
        assert!(verify_password("new-password", &hash).expect("verify"));
        assert!(!verify_password("old-password", &hash).expect("verify"));

        // Token is single-use: the identical token fails the second time
        let err = service
            .complete_recovery(&issued.token, "third-password")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_new_request_rotates_token_and_kills_old_link() {
        let pool = test_pool().await;
        let old_hash = hash_password("old-password").expect("hash");
        insert_test_user(&pool, "a@x.com", &old_hash).await;
        let service = RecoveryService::new(pool.clone(), SECRET.to_string());

        let first = service.request_recovery("a@x.com").await.expect("first");
        let second = service.request_recovery("a@x.com").await.expect("second");

        // Each request mints a distinct token and the store keeps only
        // the latest, so the earlier link dies unused
        assert_ne!(first.token, second.token);

        let err = service
            .complete_recovery(&first.token, "new-password")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid token"));

        service
            .complete_recovery(&second.token, "new-password")
            .await
            .expect("latest token redeems");
    }

    #[tokio::test]
    async fn test_forged_token_rejected() {
        let pool = test_pool().await;
        insert_test_user(&pool, "a@x.com", "hash").await;
        let service = RecoveryService::new(pool.clone(), SECRET.to_string());

        let err = service
            .complete_recovery("forged-token", "new-password")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid token"));
    }

    #[test]
    fn test_recovery_request_url_allow_list() {
        let good = models::RecoveryRequest {
            email: "a@x.com".to_string(),
            url: "http://localhost:3000/#/account/change-password".to_string(),
        };
        assert!(good.validate(&good).is_valid);

        let bad = models::RecoveryRequest {
            email: "a@x.com".to_string(),
            url: "http://evil.example/#/phish".to_string(),
        };
        let result = bad.validate(&bad);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "url");
    }

    #[test]
    fn test_change_password_request_validation() {
        let short = models::ChangePasswordRequest {
            token: "tok".to_string(),
            password: "short".to_string(),
        };
        assert!(!short.validate(&short).is_valid);

        let ok = models::ChangePasswordRequest {
            token: "tok".to_string(),
            password: "secret1".to_string(),
        };
        assert!(ok.validate(&ok).is_valid);
    }
}
