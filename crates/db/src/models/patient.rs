//! Patient model and DTOs.

use alinea_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `patients` table.
///
/// `treatment_start_date` and `batch_start_date` are calendar dates with no
/// time-of-day significance; all progression arithmetic treats them as UTC
/// midnights. `current_aligner` is the manually recorded step and may
/// diverge from the derived value; reads never overwrite it.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: DbId,
    pub rut: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub status: String,
    pub treatment_start_date: NaiveDate,
    pub change_frequency: i32,
    pub current_aligner: Option<i32>,
    pub total_aligners: Option<i32>,
    pub wear_days_per_aligner: Option<i32>,
    pub batch_start_date: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub observations: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new patient.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    pub rut: String,
    pub full_name: String,
    pub phone: String,
    #[validate(email)]
    pub email: String,
    pub treatment_start_date: NaiveDate,
    #[validate(range(min = 1))]
    pub change_frequency: i32,
    pub status: Option<String>,
    pub current_aligner: Option<i32>,
    pub total_aligners: Option<i32>,
    pub wear_days_per_aligner: Option<i32>,
    pub batch_start_date: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub observations: Option<String>,
}

/// DTO for updating a patient. Only non-`None` fields are applied.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatient {
    pub rut: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub status: Option<String>,
    pub treatment_start_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub change_frequency: Option<i32>,
    pub current_aligner: Option<i32>,
    pub total_aligners: Option<i32>,
    pub wear_days_per_aligner: Option<i32>,
    pub batch_start_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub observations: Option<String>,
}

/// Fields the reminder pass and the upcoming-changes listing need per
/// active patient. `current_aligner` is the manually recorded step; display
/// paths prefer it, while the reminder pass always derives from the cadence.
#[derive(Debug, Clone, FromRow)]
pub struct ActivePatient {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub treatment_start_date: NaiveDate,
    pub change_frequency: i32,
    pub current_aligner: Option<i32>,
}

/// Dashboard headline counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub total_patients: i64,
    pub active_patients: i64,
    pub changes_this_week: i64,
}
