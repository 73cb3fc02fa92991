//! Repository for the `patients` table.

use alinea_core::types::DbId;
use sqlx::PgPool;

use crate::models::patient::{ActivePatient, CreatePatient, Patient, UpdatePatient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rut, full_name, phone, email, status, treatment_start_date, \
     change_frequency, current_aligner, total_aligners, wear_days_per_aligner, \
     batch_start_date, avatar_url, diagnosis, treatment_plan, observations, \
     created_by, created_at, updated_at";

/// Provides CRUD operations for patients.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `ACTIVE`.
    pub async fn create(
        pool: &PgPool,
        created_by: Option<DbId>,
        input: &CreatePatient,
    ) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients (rut, full_name, phone, email, status,
                treatment_start_date, change_frequency, current_aligner,
                total_aligners, wear_days_per_aligner, batch_start_date,
                avatar_url, diagnosis, treatment_plan, observations, created_by)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'ACTIVE'), $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(&input.rut)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.status)
            .bind(input.treatment_start_date)
            .bind(input.change_frequency)
            .bind(input.current_aligner)
            .bind(input.total_aligners)
            .bind(input.wear_days_per_aligner)
            .bind(input.batch_start_date)
            .bind(&input.avatar_url)
            .bind(&input.diagnosis)
            .bind(&input.treatment_plan)
            .bind(&input.observations)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a patient by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of patients, most recently registered first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patients ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of patients.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM patients")
            .fetch_one(pool)
            .await
    }

    /// All ACTIVE patients with the fields progression and reminders need.
    ///
    /// Callers sort and slice this set in memory. That is fine for a
    /// single-practice deployment (tens to low hundreds of patients) but
    /// does not scale past that; revisit before multi-clinic rollout.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ActivePatient>, sqlx::Error> {
        sqlx::query_as::<_, ActivePatient>(
            "SELECT id, full_name, phone, treatment_start_date, change_frequency,
                current_aligner
             FROM patients WHERE status = 'ACTIVE' ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a patient. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePatient,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET
                rut = COALESCE($2, rut),
                full_name = COALESCE($3, full_name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                status = COALESCE($6, status),
                treatment_start_date = COALESCE($7, treatment_start_date),
                change_frequency = COALESCE($8, change_frequency),
                current_aligner = COALESCE($9, current_aligner),
                total_aligners = COALESCE($10, total_aligners),
                wear_days_per_aligner = COALESCE($11, wear_days_per_aligner),
                batch_start_date = COALESCE($12, batch_start_date),
                diagnosis = COALESCE($13, diagnosis),
                treatment_plan = COALESCE($14, treatment_plan),
                observations = COALESCE($15, observations),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(&input.rut)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.status)
            .bind(input.treatment_start_date)
            .bind(input.change_frequency)
            .bind(input.current_aligner)
            .bind(input.total_aligners)
            .bind(input.wear_days_per_aligner)
            .bind(input.batch_start_date)
            .bind(&input.diagnosis)
            .bind(&input.treatment_plan)
            .bind(&input.observations)
            .fetch_optional(pool)
            .await
    }

    /// Store the public URL of a freshly uploaded avatar.
    pub async fn set_avatar_url(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET avatar_url = $2, updated_at = NOW()
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a patient by ID. Returns `true` if a row was removed.
    ///
    /// Clinical records, images, notes and message logs cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
