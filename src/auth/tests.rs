//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Session token round-trip and expiry
//! - Password hashing
//! - Request validation
//! - Cookie attributes

#[cfg(test)]
mod tests {
    use super::super::{cookies, models, password, tokens};
    use crate::common::Validator;
    use axum_extra::extract::cookie::SameSite;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    const SECRET: &str = "test_secret_key";

    #[test]
    fn test_session_round_trip() {
        let token = tokens::issue_session("U_ABC123", SECRET).expect("Failed to issue session");
        let resolved = tokens::verify_session(&token, SECRET);
        assert_eq!(resolved.as_deref(), Some("U_ABC123"));
    }

    #[test]
    fn test_session_rejected_with_wrong_secret() {
        let token = tokens::issue_session("U_ABC123", SECRET).expect("Failed to issue session");
        assert!(tokens::verify_session(&token, "another_secret").is_none());
    }

    #[test]
    fn test_session_rejected_when_malformed() {
        assert!(tokens::verify_session("", SECRET).is_none());
        assert!(tokens::verify_session("not.a.jwt", SECRET).is_none());
    }

    #[test]
    fn test_session_rejected_after_expiry() {
        // Token whose window has already elapsed
        let claims = models::Claims {
            sub: "U_ABC123".to_string(),
            exp: 1_000_000, // 1970s
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode token");

        assert!(tokens::verify_session(&token, SECRET).is_none());
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = password::hash_password("secret1").expect("Failed to hash password");
        assert_ne!(hash, "secret1");
        assert!(password::verify_password("secret1", &hash).expect("verify failed"));
        assert!(!password::verify_password("wrong-pass", &hash).expect("verify failed"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = cookies::session_cookie("tok".to_string());
        assert_eq!(cookie.name(), cookies::AUTH_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_clear_cookie_matches_attributes() {
        let cookie = cookies::clear_session_cookie();
        assert_eq!(cookie.name(), cookies::AUTH_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.value(), "");
    }

    #[test]
    fn test_login_request_validation() {
        let bad_email = models::LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(!bad_email.validate(&bad_email).is_valid);

        let short_password = models::LoginRequest {
            email: "a@x.com".to_string(),
            password: "short".to_string(),
        };
        assert!(!short_password.validate(&short_password).is_valid);

        let valid = models::LoginRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate(&valid).is_valid);
    }

    #[test]
    fn test_register_request_validation() {
        let short_name = models::RegisterRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            name: "Al".to_string(),
        };
        let result = short_name.validate(&short_name);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "name");

        let valid = models::RegisterRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            name: "Ann".to_string(),
        };
        assert!(valid.validate(&valid).is_valid);
    }
}
