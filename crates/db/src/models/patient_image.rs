//! Patient image model and DTOs.

use alinea_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `patient_images` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PatientImage {
    pub id: DbId,
    pub patient_id: DbId,
    pub url: String,
    #[serde(rename = "type")]
    pub image_type: String,
    #[serde(rename = "date")]
    pub taken_at: Timestamp,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for registering an uploaded patient image.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientImage {
    pub patient_id: DbId,
    pub url: String,
    #[serde(rename = "type")]
    pub image_type: String,
    #[serde(rename = "date")]
    pub taken_at: Timestamp,
    pub description: Option<String>,
}

/// DTO for updating image metadata.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientImage {
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    #[serde(rename = "date")]
    pub taken_at: Option<Timestamp>,
    pub description: Option<String>,
}
