//! Repository for the `appointments` table.

use alinea_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{
    Appointment, AppointmentWithPatient, CreateAppointment, UpdateAppointment,
};

const COLUMNS: &str = "id, title, start_at, end_at, status, notes, patient_id, \
     todoist_task_id, created_at, updated_at";

/// Provides CRUD operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a new appointment, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `SCHEDULED`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments (title, start_at, end_at, status, notes, patient_id)
             VALUES ($1, $2, $3, COALESCE($4, 'SCHEDULED'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(&input.title)
            .bind(input.start)
            .bind(input.end)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.patient_id)
            .fetch_one(pool)
            .await
    }

    /// Find an appointment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the appointment mirroring a given Todoist task, if any.
    pub async fn find_by_todoist_task_id(
        pool: &PgPool,
        task_id: &str,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE todoist_task_id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    /// List appointments with the owning patient's name, soonest first.
    ///
    /// When both `start` and `end` are given, restricts to appointments
    /// fully inside that window (the calendar view passes month bounds).
    pub async fn list(
        pool: &PgPool,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<AppointmentWithPatient>, sqlx::Error> {
        sqlx::query_as::<_, AppointmentWithPatient>(
            "SELECT a.id, a.title, a.start_at, a.end_at, a.status, a.notes,
                    a.patient_id, a.todoist_task_id, p.full_name AS patient_name
             FROM appointments a
             LEFT JOIN patients p ON p.id = a.patient_id
             WHERE ($1::timestamptz IS NULL OR a.start_at >= $1)
               AND ($2::timestamptz IS NULL OR a.end_at <= $2)
             ORDER BY a.start_at ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Update an appointment. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                title = COALESCE($2, title),
                start_at = COALESCE($3, start_at),
                end_at = COALESCE($4, end_at),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                patient_id = COALESCE($7, patient_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.start)
            .bind(input.end)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.patient_id)
            .fetch_optional(pool)
            .await
    }

    /// Record the Todoist task mirroring this appointment.
    pub async fn set_todoist_task_id(
        pool: &PgPool,
        id: DbId,
        task_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE appointments SET todoist_task_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(task_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Move an appointment to a new start/end, used by the Todoist pull sync.
    pub async fn update_schedule(
        pool: &PgPool,
        id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE appointments SET start_at = $2, end_at = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(start)
        .bind(end)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete an appointment, returning the deleted row so callers can
    /// clean up the mirrored Todoist task.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("DELETE FROM appointments WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
