//! Aligner-change reminder dispatch.
//!
//! [`ReminderService`] runs as a background task. Each tick walks the
//! ACTIVE patient set, decides per patient whether today is a cadence
//! boundary, and sends at most one WhatsApp reminder per (patient, aligner)
//! pair. Dedup is exact-match on the logged content string; a log row is
//! written only after the gateway accepts the message, so a failed send is
//! retried on the next tick.

use std::time::Duration;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use alinea_core::reminder::{days_since_start, due_aligner, log_content, whatsapp_body};
use alinea_db::models::message_log::CreateMessageLog;
use alinea_db::models::patient::ActivePatient;
use alinea_db::repositories::{MessageLogRepo, PatientRepo};
use alinea_db::DbPool;

use crate::gateway::WhatsAppGateway;

/// Log status recorded for an accepted send.
const STATUS_SENT: &str = "SENT";

/// Outcome counts for one reminder pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTickSummary {
    /// Active patients examined.
    pub checked: usize,
    /// Reminders accepted by the gateway and logged.
    pub sent: usize,
    /// Boundaries whose reminder had already been logged.
    pub deduplicated: usize,
    /// Patients whose send or log attempt failed (retried next tick).
    pub failed: usize,
}

/// Background service dispatching aligner-change reminders.
pub struct ReminderService<G> {
    pool: DbPool,
    gateway: G,
}

impl<G: WhatsAppGateway> ReminderService<G> {
    /// Create a new service with the given database pool and gateway.
    pub fn new(pool: DbPool, gateway: G) -> Self {
        Self { pool, gateway }
    }

    /// Run the reminder loop until the token is cancelled.
    ///
    /// The reference date is read from the UTC clock once per tick and
    /// passed down explicitly; everything below the loop is testable with a
    /// synthetic "today".
    pub async fn run(&self, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Reminder scheduler cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let today = chrono::Utc::now().date_naive();
                    match self.run_tick(today).await {
                        Ok(summary) => {
                            if summary.sent > 0 || summary.failed > 0 {
                                tracing::info!(
                                    checked = summary.checked,
                                    sent = summary.sent,
                                    deduplicated = summary.deduplicated,
                                    failed = summary.failed,
                                    "Reminder pass finished"
                                );
                            }
                        }
                        Err(e) => tracing::error!(error = %e, "Reminder pass failed"),
                    }
                }
            }
        }
    }

    /// Run one reminder pass over all ACTIVE patients as of `today`.
    ///
    /// Patients are processed sequentially and in isolation: one patient's
    /// gateway or store failure never aborts the rest of the pass. Only the
    /// initial active-set query can fail the pass as a whole.
    ///
    /// Known weakness, kept by design: the boundary predicate is evaluated
    /// fresh against `today`, with no cursor of boundaries already handled.
    /// If the tick interval is coarser than one day, a boundary falling
    /// between two ticks is skipped outright rather than sent late.
    pub async fn run_tick(&self, today: NaiveDate) -> Result<ReminderTickSummary, sqlx::Error> {
        let patients = PatientRepo::list_active(&self.pool).await?;
        tracing::debug!(count = patients.len(), %today, "Checking active patients for reminders");

        let mut summary = ReminderTickSummary {
            checked: patients.len(),
            ..Default::default()
        };

        for patient in &patients {
            match self.process_patient(patient, today).await {
                Ok(PatientOutcome::NotDue) => {}
                Ok(PatientOutcome::Sent) => summary.sent += 1,
                Ok(PatientOutcome::AlreadySent) => summary.deduplicated += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        patient_id = patient.id,
                        error = %e,
                        "Failed to send reminder; will retry next tick"
                    );
                }
            }
        }

        Ok(summary)
    }

    /// Evaluate one patient and send the reminder if one is due and unsent.
    async fn process_patient(
        &self,
        patient: &ActivePatient,
        today: NaiveDate,
    ) -> Result<PatientOutcome, PatientError> {
        // The aligner number here is always derived from the cadence, never
        // the manually recorded `current_aligner`: the dedup key encodes it,
        // so a clinician correcting the stored step must not re-trigger (or
        // suppress) reminders already accounted for.
        let days = days_since_start(patient.treatment_start_date, today);
        let Some(aligner_number) = due_aligner(days, patient.change_frequency) else {
            return Ok(PatientOutcome::NotDue);
        };

        let content = log_content(aligner_number);
        if MessageLogRepo::find_by_content(&self.pool, patient.id, &content)
            .await?
            .is_some()
        {
            tracing::debug!(
                patient_id = patient.id,
                aligner_number,
                "Reminder already sent, skipping"
            );
            return Ok(PatientOutcome::AlreadySent);
        }

        let body = whatsapp_body(&patient.full_name, aligner_number);
        let message = self.gateway.send(&patient.phone, &body).await?;

        tracing::info!(
            patient_id = patient.id,
            aligner_number,
            provider_message_id = %message.provider_message_id,
            "Reminder sent"
        );

        // Logged only after the gateway accepted the message. A crash
        // between send and insert means one possible duplicate on the next
        // tick; the reverse order would mean silent loss instead.
        MessageLogRepo::insert(
            &self.pool,
            &CreateMessageLog {
                patient_id: patient.id,
                message_content: content,
                status: STATUS_SENT.to_string(),
            },
        )
        .await?;

        Ok(PatientOutcome::Sent)
    }
}

enum PatientOutcome {
    NotDue,
    Sent,
    AlreadySent,
}

/// Per-patient failure: either collaborator can fail independently.
#[derive(Debug, thiserror::Error)]
enum PatientError {
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Gateway(#[from] crate::gateway::GatewayError),
}
