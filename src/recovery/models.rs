//! Password recovery data models

use serde::{Deserialize, Serialize};

/// Claims carried by a recovery token.
///
/// There is no `exp`: the token is bounded by the stored-value equality
/// check in the recovery_tokens table, not by time. `iat` and the `jti`
/// nonce make every issued token distinct, so the upsert on a repeat
/// request really does replace the prior link.
#[derive(Serialize, Deserialize, Debug)]
pub struct RecoveryClaims {
    pub sub: String,
    pub created_at: String,
    pub iat: i64,
    pub jti: String,
}

#[derive(Deserialize)]
pub struct RecoveryRequest {
    pub email: String,
    pub url: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub token: String,
    pub password: String,
}
