//! Route definitions for the `/appointments` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /                          -> list_appointments (?start=&end=)
/// POST   /                          -> create_appointment
/// GET    /{id}                      -> get_appointment
/// PATCH  /{id}                      -> update_appointment
/// DELETE /{id}                      -> delete_appointment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/{id}",
            get(appointments::get_appointment)
                .patch(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
}
