//! Todoist pull-sync scheduler.
//!
//! Push (appointment -> task) happens inline in the API handlers; this
//! scheduler covers the reverse direction. It periodically lists the
//! mirrored tasks and, when a task's due date was moved in Todoist, shifts
//! the local appointment to that date while preserving its time-of-day and
//! duration.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use tokio_util::sync::CancellationToken;

use alinea_db::models::appointment::Appointment;
use alinea_db::repositories::AppointmentRepo;
use alinea_db::DbPool;

use crate::todoist::{TodoistClient, TodoistError};

/// Background service reconciling Todoist due-date changes into appointments.
pub struct TodoistSyncScheduler {
    pool: DbPool,
    client: TodoistClient,
}

impl TodoistSyncScheduler {
    /// Create a new scheduler with the given pool and client.
    pub fn new(pool: DbPool, client: TodoistClient) -> Self {
        Self { pool, client }
    }

    /// Run the sync loop until the token is cancelled.
    pub async fn run(&self, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Todoist sync scheduler cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sync().await {
                        tracing::error!(error = %e, "Todoist sync failed");
                    }
                }
            }
        }
    }

    /// One pull pass: reconcile every mirrored task's due date.
    ///
    /// Tasks are processed in isolation; a store error on one appointment
    /// does not abort the rest of the pass.
    pub async fn sync(&self) -> Result<(), TodoistError> {
        let tasks = self.client.list_tasks().await?;
        tracing::debug!(count = tasks.len(), "Pulled Todoist tasks");

        for task in &tasks {
            let Some(task_date) = task.due_date() else {
                continue;
            };

            let appointment =
                match AppointmentRepo::find_by_todoist_task_id(&self.pool, &task.id).await {
                    Ok(Some(appointment)) => appointment,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::error!(task_id = %task.id, error = %e, "Appointment lookup failed");
                        continue;
                    }
                };

            if appointment.start_at.date_naive() == task_date {
                continue;
            }

            if let Err(e) = self.move_appointment(&appointment, task_date).await {
                tracing::error!(
                    appointment_id = appointment.id,
                    task_id = %task.id,
                    error = %e,
                    "Failed to apply Todoist date change"
                );
            }
        }

        Ok(())
    }

    /// Shift an appointment to `new_date`, keeping time-of-day and duration.
    async fn move_appointment(
        &self,
        appointment: &Appointment,
        new_date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        let duration = appointment.end_at - appointment.start_at;
        let new_start = Utc
            .from_utc_datetime(&new_date.and_time(appointment.start_at.time()));
        let new_end = new_start + duration;

        AppointmentRepo::update_schedule(&self.pool, appointment.id, new_start, new_end).await?;

        tracing::info!(
            appointment_id = appointment.id,
            %new_date,
            "Appointment rescheduled from Todoist change"
        );
        Ok(())
    }
}
