use super::models::{ChangePasswordRequest, RecoveryRequest};
use crate::auth::validators::MIN_PASSWORD_LEN;
use crate::common::validation::is_valid_email;
use crate::common::{ValidationResult, Validator};

/// The recovery link must land on the password-reset page and nowhere
/// else. A crude allow-list, not a general URL validator.
pub const RESET_PAGE_SUFFIX: &str = "/#/account/change-password";

impl Validator<RecoveryRequest> for RecoveryRequest {
    fn validate(&self, data: &RecoveryRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(&data.email) {
            result.add_error("email", "Invalid Email");
        }

        if !data.url.ends_with(RESET_PAGE_SUFFIX) {
            result.add_error("url", "URL threatening not allowed");
        }

        result
    }
}

impl Validator<ChangePasswordRequest> for ChangePasswordRequest {
    fn validate(&self, data: &ChangePasswordRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.token.trim().is_empty() {
            result.add_error("token", "Token not found");
        }

        if data.password.len() < MIN_PASSWORD_LEN {
            result.add_error("password", "Password is too short");
        }

        result
    }
}
