//! Note routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the notes router
///
/// # Routes
/// - `POST /api/notes` - Create a note (session required)
/// - `GET /api/notes` - List own notes (session required)
/// - `PUT /api/notes` - Update an owned note (session required)
/// - `POST /api/notes/delete-note` - Delete an owned note (session required)
/// - `POST /api/notes/toggle-share` - Flip the shared flag (session required)
/// - `GET /api/notes/shared` - Public shared listing (no session)
pub fn notes_routes() -> Router {
    Router::new()
        .route(
            "/api/notes",
            post(handlers::create_note)
                .get(handlers::get_notes)
                .put(handlers::update_note),
        )
        .route("/api/notes/delete-note", post(handlers::delete_note))
        .route("/api/notes/toggle-share", post(handlers::toggle_share))
        .route("/api/notes/shared", get(handlers::shared_listing))
}
