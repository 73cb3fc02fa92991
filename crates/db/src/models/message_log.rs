//! Message log model.
//!
//! Rows are inserted by the reminder pass after a send attempt succeeds and
//! are never updated or deleted. The exact `message_content` string doubles
//! as the duplicate-reminder key.

use alinea_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `message_logs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MessageLog {
    pub id: DbId,
    pub patient_id: DbId,
    pub message_content: String,
    pub status: String,
    pub sent_at: Timestamp,
}

/// Message log joined with the patient's name, for the history view.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MessageLogWithPatient {
    pub id: DbId,
    pub patient_id: DbId,
    pub message_content: String,
    pub status: String,
    pub sent_at: Timestamp,
    pub patient_name: String,
}

/// DTO for appending a log row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageLog {
    pub patient_id: DbId,
    pub message_content: String,
    pub status: String,
}
