//! Repository for the `clinical_records` table.

use alinea_core::types::DbId;
use sqlx::PgPool;

use crate::models::clinical_record::{ClinicalRecord, CreateClinicalRecord, UpdateClinicalRecord};

const COLUMNS: &str =
    "id, patient_id, record_date, diagnosis, treatment_plan, observations, created_at, updated_at";

/// Provides CRUD operations for clinical records.
pub struct ClinicalRecordRepo;

impl ClinicalRecordRepo {
    /// Insert a new clinical record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClinicalRecord,
    ) -> Result<ClinicalRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO clinical_records (patient_id, record_date, diagnosis,
                treatment_plan, observations)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClinicalRecord>(&query)
            .bind(input.patient_id)
            .bind(input.record_date)
            .bind(&input.diagnosis)
            .bind(&input.treatment_plan)
            .bind(&input.observations)
            .fetch_one(pool)
            .await
    }

    /// Find a clinical record by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ClinicalRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clinical_records WHERE id = $1");
        sqlx::query_as::<_, ClinicalRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a patient's clinical records, most recent visit first.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: DbId,
    ) -> Result<Vec<ClinicalRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clinical_records
             WHERE patient_id = $1 ORDER BY record_date DESC"
        );
        sqlx::query_as::<_, ClinicalRecord>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    /// Update a clinical record. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClinicalRecord,
    ) -> Result<Option<ClinicalRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE clinical_records SET
                record_date = COALESCE($2, record_date),
                diagnosis = COALESCE($3, diagnosis),
                treatment_plan = COALESCE($4, treatment_plan),
                observations = COALESCE($5, observations),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClinicalRecord>(&query)
            .bind(id)
            .bind(input.record_date)
            .bind(&input.diagnosis)
            .bind(&input.treatment_plan)
            .bind(&input.observations)
            .fetch_optional(pool)
            .await
    }

    /// Delete a clinical record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clinical_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
