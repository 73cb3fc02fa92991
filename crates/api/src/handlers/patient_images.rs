//! Patient image gallery handlers.
//!
//! Images arrive as multipart uploads alongside their metadata, are stored
//! under the uploads directory, and are served back as static files by the
//! router. The gallery groups images by the calendar day they were taken,
//! so a whole day's "session" can be removed in one call.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use alinea_core::error::CoreError;
use alinea_core::types::DbId;
use alinea_core::validation::{parse_calendar_date, validate_image_type};
use alinea_db::models::patient_image::{CreatePatientImage, UpdatePatientImage};
use alinea_db::repositories::{PatientImageRepo, PatientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on accepted image size.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageListParams {
    pub patient_id: DbId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParams {
    pub patient_id: DbId,
    /// Calendar day of the session, `YYYY-MM-DD`.
    pub date: String,
}

/// GET /patient-images?patientId=
pub async fn list_patient_images(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ImageListParams>,
) -> AppResult<impl IntoResponse> {
    let images = PatientImageRepo::list_by_patient(&state.pool, params.patient_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /patient-images
///
/// Multipart form: a `file` part (image/*) plus text parts `patientId`,
/// `type`, `date` (YYYY-MM-DD) and an optional `description`.
pub async fn upload_patient_image(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut extension = String::from("jpg");
    let mut patient_id: Option<DbId> = None;
    let mut image_type: Option<String> = None;
    let mut date: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !content_type.starts_with("image/") {
                    return Err(AppError::BadRequest("Only image files are allowed".into()));
                }
                if let Some(ext) = field
                    .file_name()
                    .and_then(|name| name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()))
                {
                    extension = ext;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                if bytes.len() > MAX_IMAGE_BYTES {
                    return Err(AppError::BadRequest("Image exceeds the 10 MB limit".into()));
                }
                file_bytes = Some(bytes.to_vec());
            }
            "patientId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid patientId: {e}")))?;
                patient_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("patientId must be an integer".into()))?,
                );
            }
            "type" => {
                image_type = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid type: {e}")))?,
                );
            }
            "date" => {
                date = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid date: {e}")))?,
                );
            }
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid description: {e}")))?;
                if !text.trim().is_empty() {
                    description = Some(text);
                }
            }
            _ => {}
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| AppError::BadRequest("A file part is required".into()))?;
    let patient_id =
        patient_id.ok_or_else(|| AppError::BadRequest("patientId is required".into()))?;
    let image_type =
        image_type.ok_or_else(|| AppError::BadRequest("type is required".into()))?;
    let date = date.ok_or_else(|| AppError::BadRequest("date is required".into()))?;

    validate_image_type(&image_type).map_err(AppError::BadRequest)?;
    let taken_on = parse_calendar_date(&date).map_err(AppError::BadRequest)?;

    PatientRepo::find_by_id(&state.pool, patient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id: patient_id,
        }))?;

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let dir = std::path::Path::new(&state.config.uploads_dir).join("patient-images");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;
    tokio::fs::write(dir.join(&filename), &file_bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    let input = CreatePatientImage {
        patient_id,
        url: format!("{}/uploads/patient-images/{filename}", state.config.public_url),
        image_type,
        taken_at: taken_on.and_time(NaiveTime::MIN).and_utc(),
        description,
    };
    let image = PatientImageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        patient_id,
        image_id = image.id,
        "Patient image uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// PATCH /patient-images/{id}
pub async fn update_patient_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePatientImage>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref image_type) = input.image_type {
        validate_image_type(image_type).map_err(AppError::BadRequest)?;
    }
    let image = PatientImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PatientImage",
            id,
        }))?;
    Ok(Json(DataResponse { data: image }))
}

/// DELETE /patient-images/{id}
pub async fn delete_patient_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PatientImageRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PatientImage",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /patient-images/session?patientId=&date=
///
/// Removes every image the patient has for one calendar day.
pub async fn delete_image_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> AppResult<impl IntoResponse> {
    let date = parse_calendar_date(&params.date).map_err(AppError::BadRequest)?;
    let removed = PatientImageRepo::delete_session(&state.pool, params.patient_id, date).await?;

    tracing::info!(
        user_id = auth.user_id,
        patient_id = params.patient_id,
        %date,
        removed,
        "Image session deleted"
    );
    Ok(Json(DataResponse {
        data: json!({ "deleted": removed }),
    }))
}
