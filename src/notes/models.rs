//! Note data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::serialize_tags;

/// Note database model. Tags are stored as a JSON array string and
/// rendered as an array in responses. Rows are only ever read from the
/// database and serialized out, never parsed back in.
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub notes: String,
    #[serde(serialize_with = "serialize_tags")]
    pub tags: Option<String>,
    pub shared: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateNoteRequest {
    pub notes: String,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub shared: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateNoteRequest {
    pub id: String,
    pub notes: String,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub shared: Option<bool>,
}

#[derive(Deserialize)]
pub struct DeleteNoteRequest {
    pub id: String,
}

#[derive(Deserialize)]
pub struct ToggleShareRequest {
    pub id: String,
}

#[derive(Deserialize)]
pub struct ToggleShareQuery {
    pub flag: bool,
}

#[derive(Deserialize)]
pub struct SharedListingQuery {
    pub id: String,
}

/// Public profile subset for the shared listing; no credential material
#[derive(FromRow, Serialize, Debug)]
pub struct SharedProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct SharedListingResponse {
    pub user: SharedProfile,
    pub notes: Vec<Note>,
}
