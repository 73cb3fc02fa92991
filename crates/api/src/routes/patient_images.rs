//! Route definitions for the `/patient-images` resource.
//!
//! All endpoints require authentication. `/session` is registered before
//! `/{id}` for readability; axum matches the literal segment either way.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::patient_images;
use crate::state::AppState;

/// Body cap for image uploads: the 10 MB file plus multipart framing.
const IMAGE_BODY_LIMIT: usize = 11 * 1024 * 1024;

/// Routes mounted at `/patient-images`.
///
/// ```text
/// GET    /                          -> list_patient_images (?patientId=)
/// POST   /                          -> upload_patient_image (multipart)
/// DELETE /session                   -> delete_image_session (?patientId=&date=)
/// PATCH  /{id}                      -> update_patient_image
/// DELETE /{id}                      -> delete_patient_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(patient_images::list_patient_images).post(
                patient_images::upload_patient_image,
            ),
        )
        .route("/session", delete(patient_images::delete_image_session))
        .route(
            "/{id}",
            patch(patient_images::update_patient_image)
                .delete(patient_images::delete_patient_image),
        )
        .layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT))
}
