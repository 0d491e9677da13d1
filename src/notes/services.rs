//! Note persistence and the ownership gate
//!
//! `assert_owner` is the single authorization function for note-scoped
//! mutations. A missing note and a foreign note produce the same generic
//! Unauthorized, so non-owners learn nothing about note existence.

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::{CreateNoteRequest, Note, SharedProfile, UpdateNoteRequest};
use crate::common::{generate_note_id, now_rfc3339, ApiError};

pub struct NotesService {
    db: SqlitePool,
}

impl NotesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Load a note and require that `user_id` owns it
    pub async fn assert_owner(&self, note_id: &str, user_id: &str) -> Result<Note, ApiError> {
        let note: Option<Note> = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = ?")
            .bind(note_id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        match note {
            Some(n) if n.user_id == user_id => Ok(n),
            Some(_) => {
                warn!(note_id = %note_id, user_id = %user_id, "Ownership check failed");
                Err(ApiError::Unauthorized("Unauthorized".to_string()))
            }
            None => {
                // Indistinguishable from the foreign-owner case
                warn!(note_id = %note_id, user_id = %user_id, "Ownership check on missing note");
                Err(ApiError::Unauthorized("Unauthorized".to_string()))
            }
        }
    }

    pub async fn create_note(
        &self,
        user_id: &str,
        request: CreateNoteRequest,
    ) -> Result<Note, ApiError> {
        let id = generate_note_id();
        let now = now_rfc3339();
        let tags_json = request
            .tags
            .as_ref()
            .map(|t| serde_json::to_string(t).unwrap_or_else(|_| "[]".to_string()));

        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, title, notes, tags, shared, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(request.title.as_deref())
        .bind(request.notes.trim())
        .bind(tags_json.as_deref())
        .bind(request.shared.unwrap_or(false) as i64)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(note_id = %id, user_id = %user_id, "Note created");

        self.fetch_note(&id).await
    }

    pub async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>, ApiError> {
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE user_id = ? ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn update_note(
        &self,
        user_id: &str,
        request: UpdateNoteRequest,
    ) -> Result<Note, ApiError> {
        let current = self.assert_owner(&request.id, user_id).await?;

        // Omitted optional fields keep their stored values
        let title = request.title.or(current.title);
        let tags_json = match request.tags.as_ref() {
            Some(t) => Some(serde_json::to_string(t).unwrap_or_else(|_| "[]".to_string())),
            None => current.tags,
        };
        let shared = request.shared.map(|f| f as i64).unwrap_or(current.shared);

        sqlx::query(
            r#"
            UPDATE notes
            SET title = ?, notes = ?, tags = ?, shared = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(title.as_deref())
        .bind(request.notes.trim())
        .bind(tags_json.as_deref())
        .bind(shared)
        .bind(now_rfc3339())
        .bind(&request.id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        self.fetch_note(&request.id).await
    }

    pub async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<(), ApiError> {
        self.assert_owner(note_id, user_id).await?;

        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(note_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(note_id = %note_id, user_id = %user_id, "Note deleted");

        Ok(())
    }

    pub async fn toggle_share(
        &self,
        user_id: &str,
        note_id: &str,
        flag: bool,
    ) -> Result<Note, ApiError> {
        self.assert_owner(note_id, user_id).await?;

        sqlx::query("UPDATE notes SET shared = ?, updated_at = ? WHERE id = ?")
            .bind(flag as i64)
            .bind(now_rfc3339())
            .bind(note_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        self.fetch_note(note_id).await
    }

    /// Unauthenticated capability-by-URL read: the target user's public
    /// profile fields plus their notes flagged shared.
    pub async fn shared_listing(
        &self,
        user_id: &str,
    ) -> Result<(SharedProfile, Vec<Note>), ApiError> {
        let profile: Option<SharedProfile> =
            sqlx::query_as::<_, SharedProfile>("SELECT id, name, email FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        let profile = match profile {
            Some(p) => p,
            None => return Err(ApiError::BadRequest("Invalid Link".to_string())),
        };

        let notes = sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE user_id = ? AND shared = 1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok((profile, notes))
    }

    async fn fetch_note(&self, note_id: &str) -> Result<Note, ApiError> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = ?")
            .bind(note_id)
            .fetch_one(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }
}
