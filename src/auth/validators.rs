use super::models::{LoginRequest, RegisterRequest};
use crate::common::validation::{is_valid_email, meets_min_len};
use crate::common::{ValidationResult, Validator};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 3;

impl Validator<LoginRequest> for LoginRequest {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(&data.email) {
            result.add_error("email", "Email is not valid");
        }

        if data.password.len() < MIN_PASSWORD_LEN {
            result.add_error("password", "Password is too short");
        }

        result
    }
}

impl Validator<RegisterRequest> for RegisterRequest {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(&data.email) {
            result.add_error("email", "Email is not valid");
        }

        if data.password.len() < MIN_PASSWORD_LEN {
            result.add_error("password", "Password is too short");
        }

        if !meets_min_len(&data.name, MIN_NAME_LEN) {
            result.add_error("name", "Name is too short");
        }

        result
    }
}
