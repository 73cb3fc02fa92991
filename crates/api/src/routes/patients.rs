//! Route definitions for the `/patients` resource.
//!
//! All endpoints require authentication. The static paths (`/stats`,
//! `/upcoming`) are registered alongside `/{id}`; axum matches literal
//! segments before captures, so the order here is not load-bearing.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::patients;
use crate::state::AppState;

/// Body cap for avatar uploads: the 5 MB file plus multipart framing.
const AVATAR_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Routes mounted at `/patients`.
///
/// ```text
/// GET    /                          -> list_patients
/// POST   /                          -> create_patient
/// GET    /stats                     -> get_stats
/// GET    /upcoming                  -> list_upcoming_changes
/// GET    /{id}                      -> get_patient
/// PATCH  /{id}                      -> update_patient
/// DELETE /{id}                      -> delete_patient
/// POST   /{id}/avatar               -> upload_avatar (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(patients::list_patients).post(patients::create_patient))
        .route("/stats", get(patients::get_stats))
        .route("/upcoming", get(patients::list_upcoming_changes))
        .route(
            "/{id}",
            get(patients::get_patient)
                .patch(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/{id}/avatar",
            post(patients::upload_avatar).layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
        )
}
