pub mod appointments;
pub mod auth;
pub mod clinical_records;
pub mod health;
pub mod message_logs;
pub mod notes;
pub mod patient_images;
pub mod patients;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
///
/// /patients                                        list, create
/// /patients/stats                                  dashboard counts
/// /patients/upcoming                               upcoming aligner changes
/// /patients/{id}                                   get, update, delete
/// /patients/{id}/avatar                            avatar upload (multipart)
///
/// /appointments                                    list (?start=&end=), create
/// /appointments/{id}                               get, update, delete
///
/// /clinical-records                                list (?patientId=), create
/// /clinical-records/{id}                           get, update, delete
///
/// /patient-images                                  list (?patientId=), upload
/// /patient-images/session                          delete a day's session
/// /patient-images/{id}                             update, delete
///
/// /notes                                           list (?patientId= | general), create
/// /notes/{id}                                      update, delete
///
/// /message-logs                                    reminder audit trail
/// ```
///
/// `/health` is mounted at the root level by the router builder, not here.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/patients", patients::router())
        .nest("/appointments", appointments::router())
        .nest("/clinical-records", clinical_records::router())
        .nest("/patient-images", patient_images::router())
        .nest("/notes", notes::router())
        .nest("/message-logs", message_logs::router())
}
