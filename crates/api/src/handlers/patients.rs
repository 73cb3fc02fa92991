//! Patient handlers: CRUD, dashboard stats, upcoming aligner changes, and
//! avatar upload.
//!
//! Every patient representation leaving this module carries the derived
//! progression fields and `urgencyStatus`. Derived values are computed per
//! request against today's UTC date and are never written back to the
//! store: the stored `current_aligner` wins when present, the derived one
//! fills in when it is not.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use alinea_core::error::CoreError;
use alinea_core::progression::{progress_as_of, AlignerProgress};
use alinea_core::types::DbId;
use alinea_core::urgency::{classify, UrgencyStatus};
use alinea_core::validation::validate_patient_status;
use alinea_db::models::patient::{CreatePatient, Patient, PatientStats, UpdatePatient};
use alinea_db::repositories::PatientRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// Default page size for the patient table.
const DEFAULT_PAGE_LIMIT: i64 = 10;
/// Default page size for the upcoming-changes widget.
const DEFAULT_UPCOMING_LIMIT: i64 = 5;
/// Upper bound on accepted avatar size.
const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// A patient row plus the derived progression and urgency fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientView {
    #[serde(flatten)]
    patient: Patient,
    urgency_status: UrgencyStatus,
    days_until_next_change: i64,
    next_change_date: NaiveDate,
}

impl PatientView {
    /// Attach derived fields as of `today`.
    ///
    /// The stored `current_aligner` is preferred when present; the derived
    /// value only fills an empty column, and only in this in-memory view.
    pub fn derive(mut patient: Patient, today: NaiveDate) -> Self {
        let progress = progress_as_of(patient.treatment_start_date, patient.change_frequency, today);
        let urgency_status = classify(
            patient.total_aligners,
            patient.batch_start_date,
            patient.wear_days_per_aligner,
            today,
        );
        if patient.current_aligner.is_none() {
            patient.current_aligner = Some(progress.current_aligner);
        }
        Self {
            patient,
            urgency_status,
            days_until_next_change: progress.days_until_next_change,
            next_change_date: progress.next_change_date,
        }
    }
}

/// One row of the upcoming-changes listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingChange {
    pub id: DbId,
    pub full_name: String,
    pub current_aligner: i32,
    pub days_until_next_change: i64,
    pub next_change_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /patients?page=&limit=
///
/// Paginated patient table, most recently registered first.
pub async fn list_patients(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit(DEFAULT_PAGE_LIMIT);
    let offset = params.offset(DEFAULT_PAGE_LIMIT);

    let patients = PatientRepo::list(&state.pool, limit, offset).await?;
    let total = PatientRepo::count(&state.pool).await?;

    let today = chrono::Utc::now().date_naive();
    let data: Vec<PatientView> = patients
        .into_iter()
        .map(|p| PatientView::derive(p, today))
        .collect();

    Ok(Json(PaginatedResponse::new(
        data,
        total,
        params.page(),
        limit,
    )))
}

/// GET /patients/stats
///
/// Dashboard headline counts.
pub async fn get_stats(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let total_patients = PatientRepo::count(&state.pool).await?;
    let active = PatientRepo::list_active(&state.pool).await?;

    let today = chrono::Utc::now().date_naive();
    let changes_this_week = active
        .iter()
        .map(|p| progress_as_of(p.treatment_start_date, p.change_frequency, today))
        .filter(|progress| progress.days_until_next_change <= 7)
        .count() as i64;

    Ok(Json(DataResponse {
        data: PatientStats {
            total_patients,
            active_patients: active.len() as i64,
            changes_this_week,
        },
    }))
}

/// GET /patients/upcoming?page=&limit=
///
/// ACTIVE patients ordered by how soon their next aligner change is due.
/// Sorting and slicing happen in memory over the full active set; ties on
/// the day count break by patient id so pagination is stable.
pub async fn list_upcoming_changes(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let today = chrono::Utc::now().date_naive();
    let active = PatientRepo::list_active(&state.pool).await?;

    let mut changes: Vec<UpcomingChange> = active
        .into_iter()
        .map(|p| {
            let progress: AlignerProgress =
                progress_as_of(p.treatment_start_date, p.change_frequency, today);
            UpcomingChange {
                id: p.id,
                full_name: p.full_name,
                // Same rule as the detail view: the recorded step wins.
                current_aligner: p.current_aligner.unwrap_or(progress.current_aligner),
                days_until_next_change: progress.days_until_next_change,
                next_change_date: progress.next_change_date,
            }
        })
        .collect();
    changes.sort_by_key(|c| (c.days_until_next_change, c.id));

    let total = changes.len() as i64;
    let limit = params.limit(DEFAULT_UPCOMING_LIMIT);
    let offset = params.offset(DEFAULT_UPCOMING_LIMIT);
    let data: Vec<UpcomingChange> = changes
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Ok(Json(PaginatedResponse::new(
        data,
        total,
        params.page(),
        limit,
    )))
}

/// GET /patients/{id}
pub async fn get_patient(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: PatientView::derive(patient, today),
    }))
}

/// POST /patients
pub async fn create_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePatient>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if let Some(ref status) = input.status {
        validate_patient_status(status).map_err(AppError::BadRequest)?;
    }

    let patient = PatientRepo::create(&state.pool, Some(auth.user_id), &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        patient_id = patient.id,
        "Patient registered"
    );

    let today = chrono::Utc::now().date_naive();
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PatientView::derive(patient, today),
        }),
    ))
}

/// PATCH /patients/{id}
pub async fn update_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePatient>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if let Some(ref status) = input.status {
        validate_patient_status(status).map_err(AppError::BadRequest)?;
    }

    let patient = PatientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, patient_id = id, "Patient updated");

    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: PatientView::derive(patient, today),
    }))
}

/// DELETE /patients/{id}
pub async fn delete_patient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PatientRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, patient_id = id, "Patient deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /patients/{id}/avatar
///
/// Multipart upload of a profile picture. The file lands under
/// `<uploads_dir>/avatars/` and the public URL is stored on the patient.
pub async fn upload_avatar(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("File is required".into()))?;

    let content_type = field.content_type().unwrap_or_default().to_string();
    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest("Only image files are allowed".into()));
    }

    let extension = field
        .file_name()
        .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()))
        .unwrap_or_else(|| "jpg".into());

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(AppError::BadRequest("Avatar exceeds the 5 MB limit".into()));
    }

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let dir = std::path::Path::new(&state.config.uploads_dir).join("avatars");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;
    tokio::fs::write(dir.join(&filename), &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store avatar: {e}")))?;

    let url = format!("{}/uploads/avatars/{filename}", state.config.public_url);
    let patient = PatientRepo::set_avatar_url(&state.pool, id, &url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, patient_id = id, "Avatar uploaded");

    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse {
        data: PatientView::derive(patient, today),
    }))
}
