//! Free-form note model and DTOs.

use alinea_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
///
/// A NULL `patient_id` marks a general dashboard note.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub patient_id: Option<DbId>,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a note.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub patient_id: Option<DbId>,
    pub content: String,
}

/// DTO for updating a note's content.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub content: Option<String>,
}
