//! Clinical record model and DTOs.

use alinea_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clinical_records` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecord {
    pub id: DbId,
    pub patient_id: DbId,
    #[serde(rename = "date")]
    pub record_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub observations: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a clinical record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClinicalRecord {
    pub patient_id: DbId,
    #[serde(rename = "date")]
    pub record_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub observations: Option<String>,
}

/// DTO for updating a clinical record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClinicalRecord {
    #[serde(rename = "date")]
    pub record_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub observations: Option<String>,
}
