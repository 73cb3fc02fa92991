//! Repository for the `message_logs` table.
//!
//! Append-only from the reminder engine's point of view: rows are inserted
//! after a successful send and never updated or deleted. The exact-content
//! lookup is the duplicate-reminder guard.

use alinea_core::types::DbId;
use sqlx::PgPool;

use crate::models::message_log::{CreateMessageLog, MessageLog, MessageLogWithPatient};

const COLUMNS: &str = "id, patient_id, message_content, status, sent_at";

/// Provides insert and lookup operations for message logs.
pub struct MessageLogRepo;

impl MessageLogRepo {
    /// Append one log row, returning it.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateMessageLog,
    ) -> Result<MessageLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO message_logs (patient_id, message_content, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MessageLog>(&query)
            .bind(input.patient_id)
            .bind(&input.message_content)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a log row for this patient with exactly this content.
    ///
    /// Byte-for-byte equality on `message_content` is intentional: it is
    /// the sole dedup key, so the canonical content format must stay
    /// stable across releases.
    pub async fn find_by_content(
        pool: &PgPool,
        patient_id: DbId,
        content: &str,
    ) -> Result<Option<MessageLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM message_logs
             WHERE patient_id = $1 AND message_content = $2
             LIMIT 1"
        );
        sqlx::query_as::<_, MessageLog>(&query)
            .bind(patient_id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// All logs with the patient's name, most recent first.
    pub async fn list_with_patient(
        pool: &PgPool,
    ) -> Result<Vec<MessageLogWithPatient>, sqlx::Error> {
        sqlx::query_as::<_, MessageLogWithPatient>(
            "SELECT m.id, m.patient_id, m.message_content, m.status, m.sent_at,
                    p.full_name AS patient_name
             FROM message_logs m
             JOIN patients p ON p.id = m.patient_id
             ORDER BY m.sent_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of log rows for one patient (test and ops helper).
    pub async fn count_for_patient(pool: &PgPool, patient_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM message_logs WHERE patient_id = $1")
            .bind(patient_id)
            .fetch_one(pool)
            .await
    }
}
