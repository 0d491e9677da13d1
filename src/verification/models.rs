//! Verification (OTP) data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// OTP database record, at most one live per user
#[derive(FromRow, Debug)]
pub struct OtpRecord {
    pub user_id: String,
    pub code: i64,
    pub created_at: String,
    pub expires_at: String,
}

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct MatchOtpRequest {
    pub otp: i64,
    pub user_id: String,
}

#[derive(Serialize)]
pub struct OtpRequestedResponse {
    pub user_id: String,
}

/// Result of a successful OTP issuance, consumed by the delivery step
#[derive(Debug)]
pub struct IssuedOtp {
    pub user_id: String,
    pub user_name: String,
    pub code: i64,
}
