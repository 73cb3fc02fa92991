//! Repository for the `notes` table.

use alinea_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, UpdateNote};

const COLUMNS: &str = "id, patient_id, content, created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (patient_id, content) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.patient_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List notes, newest first.
    ///
    /// With a patient ID, lists that patient's notes; without one, lists
    /// the general dashboard notes (rows with a NULL patient).
    pub async fn list(
        pool: &PgPool,
        patient_id: Option<DbId>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = match patient_id {
            Some(_) => format!(
                "SELECT {COLUMNS} FROM notes WHERE patient_id = $1 ORDER BY created_at DESC"
            ),
            None => format!(
                "SELECT {COLUMNS} FROM notes WHERE patient_id IS NULL ORDER BY created_at DESC"
            ),
        };
        let mut q = sqlx::query_as::<_, Note>(&query);
        if let Some(id) = patient_id {
            q = q.bind(id);
        }
        q.fetch_all(pool).await
    }

    /// Update a note's content.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET content = COALESCE($2, content), updated_at = NOW()
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
