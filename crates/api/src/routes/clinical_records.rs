//! Route definitions for the `/clinical-records` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::clinical_records;
use crate::state::AppState;

/// Routes mounted at `/clinical-records`.
///
/// ```text
/// GET    /                          -> list_clinical_records (?patientId=)
/// POST   /                          -> create_clinical_record
/// GET    /{id}                      -> get_clinical_record
/// PATCH  /{id}                      -> update_clinical_record
/// DELETE /{id}                      -> delete_clinical_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(clinical_records::list_clinical_records)
                .post(clinical_records::create_clinical_record),
        )
        .route(
            "/{id}",
            get(clinical_records::get_clinical_record)
                .patch(clinical_records::update_clinical_record)
                .delete(clinical_records::delete_clinical_record),
        )
}
