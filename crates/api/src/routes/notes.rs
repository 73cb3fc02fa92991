//! Route definitions for the `/notes` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET    /                          -> list_notes (?patientId= | general)
/// POST   /                          -> create_note
/// PATCH  /{id}                      -> update_note
/// DELETE /{id}                      -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/{id}",
            axum::routing::patch(notes::update_note).delete(notes::delete_note),
        )
}
