//! Appointment handlers.
//!
//! Appointments are mirrored to Todoist as tasks when the integration is
//! configured. Mirroring is best-effort: a Todoist failure is logged and
//! the request still succeeds, because the appointment row is the source
//! of record.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use alinea_core::error::CoreError;
use alinea_core::types::{DbId, Timestamp};
use alinea_core::validation::validate_appointment_status;
use alinea_db::models::appointment::{Appointment, CreateAppointment, UpdateAppointment};
use alinea_db::repositories::AppointmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the calendar range filter.
#[derive(Debug, Deserialize)]
pub struct AppointmentRangeParams {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

/// GET /appointments?start=&end=
///
/// List appointments (optionally within a window), soonest first, with the
/// owning patient's name for the calendar view.
pub async fn list_appointments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AppointmentRangeParams>,
) -> AppResult<impl IntoResponse> {
    let appointments = AppointmentRepo::list(&state.pool, params.start, params.end).await?;
    Ok(Json(DataResponse { data: appointments }))
}

/// GET /appointments/{id}
pub async fn get_appointment(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let appointment = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;
    Ok(Json(DataResponse { data: appointment }))
}

/// POST /appointments
pub async fn create_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAppointment>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        validate_appointment_status(status).map_err(AppError::BadRequest)?;
    }
    if input.end <= input.start {
        return Err(AppError::BadRequest(
            "Appointment end must be after its start".into(),
        ));
    }

    let mut appointment = AppointmentRepo::create(&state.pool, &input).await?;

    if let Some(todoist) = &state.todoist {
        let description = match appointment.patient_id {
            Some(patient_id) => format!("Appointment for patient ID: {patient_id}"),
            None => "Appointment".to_string(),
        };
        match todoist
            .create_task(
                &appointment.title,
                appointment.start_at.date_naive(),
                &description,
            )
            .await
        {
            Ok(task_id) => {
                AppointmentRepo::set_todoist_task_id(&state.pool, appointment.id, &task_id)
                    .await?;
                appointment.todoist_task_id = Some(task_id);
            }
            Err(e) => {
                tracing::warn!(
                    appointment_id = appointment.id,
                    error = %e,
                    "Failed to mirror appointment to Todoist"
                );
            }
        }
    }

    tracing::info!(
        user_id = auth.user_id,
        appointment_id = appointment.id,
        "Appointment scheduled"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: appointment })))
}

/// PATCH /appointments/{id}
pub async fn update_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        validate_appointment_status(status).map_err(AppError::BadRequest)?;
    }

    let appointment = AppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;

    if let (Some(todoist), Some(task_id)) = (&state.todoist, &appointment.todoist_task_id) {
        if let Err(e) = todoist
            .update_task(
                task_id,
                Some(&appointment.title),
                Some(appointment.start_at.date_naive()),
            )
            .await
        {
            tracing::warn!(
                appointment_id = id,
                error = %e,
                "Failed to push appointment update to Todoist"
            );
        }
    }

    tracing::info!(user_id = auth.user_id, appointment_id = id, "Appointment updated");
    Ok(Json(DataResponse { data: appointment }))
}

/// DELETE /appointments/{id}
pub async fn delete_appointment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let appointment: Appointment = AppointmentRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;

    if let (Some(todoist), Some(task_id)) = (&state.todoist, &appointment.todoist_task_id) {
        if let Err(e) = todoist.delete_task(task_id).await {
            tracing::warn!(
                appointment_id = id,
                error = %e,
                "Failed to delete mirrored Todoist task"
            );
        }
    }

    tracing::info!(user_id = auth.user_id, appointment_id = id, "Appointment deleted");
    Ok(StatusCode::NO_CONTENT)
}
