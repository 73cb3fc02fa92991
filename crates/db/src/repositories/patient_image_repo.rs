//! Repository for the `patient_images` table.

use alinea_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::patient_image::{CreatePatientImage, PatientImage, UpdatePatientImage};

const COLUMNS: &str = "id, patient_id, url, image_type, taken_at, description, created_at";

/// Provides CRUD operations for patient images.
pub struct PatientImageRepo;

impl PatientImageRepo {
    /// Insert a new image row, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePatientImage,
    ) -> Result<PatientImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO patient_images (patient_id, url, image_type, taken_at, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PatientImage>(&query)
            .bind(input.patient_id)
            .bind(&input.url)
            .bind(&input.image_type)
            .bind(input.taken_at)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List a patient's images, most recent session first.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: DbId,
    ) -> Result<Vec<PatientImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patient_images WHERE patient_id = $1 ORDER BY taken_at DESC"
        );
        sqlx::query_as::<_, PatientImage>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    /// Update image metadata. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePatientImage,
    ) -> Result<Option<PatientImage>, sqlx::Error> {
        let query = format!(
            "UPDATE patient_images SET
                image_type = COALESCE($2, image_type),
                taken_at = COALESCE($3, taken_at),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PatientImage>(&query)
            .bind(id)
            .bind(&input.image_type)
            .bind(input.taken_at)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete one image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patient_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every image a patient has for one calendar day (a photo
    /// "session"), returning how many rows were removed.
    pub async fn delete_session(
        pool: &PgPool,
        patient_id: DbId,
        date: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM patient_images
             WHERE patient_id = $1 AND (taken_at AT TIME ZONE 'UTC')::date = $2",
        )
        .bind(patient_id)
        .bind(date)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
