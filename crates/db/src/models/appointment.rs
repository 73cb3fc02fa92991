//! Appointment model and DTOs.

use alinea_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
///
/// `todoist_task_id` links the appointment to its mirrored Todoist task;
/// NULL when the integration is disabled or the task create failed.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "start")]
    pub start_at: Timestamp,
    #[serde(rename = "end")]
    pub end_at: Timestamp,
    pub status: String,
    pub notes: Option<String>,
    pub patient_id: Option<DbId>,
    pub todoist_task_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Appointment plus the owning patient's name, for calendar listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentWithPatient {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "start")]
    pub start_at: Timestamp,
    #[serde(rename = "end")]
    pub end_at: Timestamp,
    pub status: String,
    pub notes: Option<String>,
    pub patient_id: Option<DbId>,
    pub todoist_task_id: Option<String>,
    pub patient_name: Option<String>,
}

/// DTO for scheduling a new appointment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointment {
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub patient_id: Option<DbId>,
}

/// DTO for updating an appointment. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointment {
    pub title: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub patient_id: Option<DbId>,
}
