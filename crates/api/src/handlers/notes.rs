//! Note handlers.
//!
//! Notes come in two flavors served by the same endpoints: patient-scoped
//! (listed with `?patientId=`) and general dashboard notes (no query
//! parameter, stored with a NULL patient).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use alinea_core::error::CoreError;
use alinea_core::types::DbId;
use alinea_db::models::note::{CreateNote, UpdateNote};
use alinea_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    pub patient_id: Option<DbId>,
}

/// GET /notes?patientId=
pub async fn list_notes(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<impl IntoResponse> {
    let notes = NoteRepo::list(&state.pool, params.patient_id).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /notes
pub async fn create_note(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest("Note content must not be empty".into()));
    }
    let note = NoteRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// PATCH /notes/{id}
pub async fn update_note(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref content) = input.content {
        if content.trim().is_empty() {
            return Err(AppError::BadRequest("Note content must not be empty".into()));
        }
    }
    let note = NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;
    Ok(Json(DataResponse { data: note }))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = NoteRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Note", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
