use super::models::{MatchOtpRequest, RequestOtpRequest};
use super::services::{OTP_MAX_EXCLUSIVE, OTP_MIN_EXCLUSIVE};
use crate::common::validation::is_valid_email;
use crate::common::{ValidationResult, Validator};

impl Validator<RequestOtpRequest> for RequestOtpRequest {
    fn validate(&self, data: &RequestOtpRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(&data.email) {
            result.add_error("email", "Email is not valid");
        }

        result
    }
}

impl Validator<MatchOtpRequest> for MatchOtpRequest {
    fn validate(&self, data: &MatchOtpRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Six digits, both bounds excluded
        if data.otp <= OTP_MIN_EXCLUSIVE || data.otp >= OTP_MAX_EXCLUSIVE {
            result.add_error("otp", "OTP must be a 6-digit code");
        }

        if data.user_id.trim().is_empty() {
            result.add_error("user_id", "User id not found");
        }

        result
    }
}
