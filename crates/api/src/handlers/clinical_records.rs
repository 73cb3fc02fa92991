//! Clinical record handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use alinea_core::error::CoreError;
use alinea_core::types::DbId;
use alinea_db::models::clinical_record::{CreateClinicalRecord, UpdateClinicalRecord};
use alinea_db::repositories::{ClinicalRecordRepo, PatientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientScopeParams {
    pub patient_id: DbId,
}

/// GET /clinical-records?patientId=
pub async fn list_clinical_records(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PatientScopeParams>,
) -> AppResult<impl IntoResponse> {
    let records = ClinicalRecordRepo::list_by_patient(&state.pool, params.patient_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /clinical-records/{id}
pub async fn get_clinical_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = ClinicalRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ClinicalRecord",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /clinical-records
pub async fn create_clinical_record(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateClinicalRecord>,
) -> AppResult<impl IntoResponse> {
    // Reject unknown patients up front so the client gets a 404 rather
    // than a foreign-key 500.
    PatientRepo::find_by_id(&state.pool, input.patient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id: input.patient_id,
        }))?;

    let record = ClinicalRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = auth.user_id,
        patient_id = input.patient_id,
        record_id = record.id,
        "Clinical record created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PATCH /clinical-records/{id}
pub async fn update_clinical_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClinicalRecord>,
) -> AppResult<impl IntoResponse> {
    let record = ClinicalRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ClinicalRecord",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /clinical-records/{id}
pub async fn delete_clinical_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ClinicalRecordRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ClinicalRecord",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
