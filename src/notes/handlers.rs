//! Note handlers
//!
//! Every route except the shared listing resolves the session cookie
//! through the AuthedUser extractor before touching note data.

use axum::extract::{Extension, Json, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{
    CreateNoteRequest, DeleteNoteRequest, SharedListingQuery, SharedListingResponse,
    ToggleShareQuery, ToggleShareRequest, UpdateNoteRequest,
};
use super::services::NotesService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};

/// POST /api/notes - Create a note
pub async fn create_note(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service = NotesService::new(state.db.clone());

    let note = service.create_note(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes - List the caller's notes
pub async fn get_notes(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();
    let service = NotesService::new(state.db.clone());

    let notes = service.list_notes(&user.id).await?;

    Ok(Json(notes))
}

/// PUT /api/notes - Update an owned note
pub async fn update_note(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service = NotesService::new(state.db.clone());

    let note = service.update_note(&user.id, request).await?;

    Ok(Json(note))
}

/// POST /api/notes/delete-note - Delete an owned note
pub async fn delete_note(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<DeleteNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();
    let service = NotesService::new(state.db.clone());

    service.delete_note(&user.id, &request.id).await?;

    Ok(Json(serde_json::json!("Notes Deleted")))
}

/// POST /api/notes/toggle-share?flag=bool - Flip the shared flag on an owned note
pub async fn toggle_share(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Query(query): Query<ToggleShareQuery>,
    Json(request): Json<ToggleShareRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();
    let service = NotesService::new(state.db.clone());

    let note = service
        .toggle_share(&user.id, &request.id, query.flag)
        .await?;

    Ok(Json(note))
}

/// GET /api/notes/shared?id=<user_id> - Public listing of a user's shared notes
///
/// Deliberately unauthenticated: capability by URL, read-only, and
/// limited to notes flagged shared plus public profile fields.
pub async fn shared_listing(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(query): Query<SharedListingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();
    let service = NotesService::new(state.db.clone());

    let (user, notes) = service.shared_listing(&query.id).await?;

    Ok(Json(SharedListingResponse { user, notes }))
}
