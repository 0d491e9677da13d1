//! Federated login data models

use serde::Deserialize;

#[derive(Deserialize)]
pub struct GithubCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct GithubTokenResponse {
    pub access_token: Option<String>,
}

/// Subset of the GitHub /user profile this service maps onto a User
#[derive(Deserialize, Debug)]
pub struct GithubProfile {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}
