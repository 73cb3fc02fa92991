//! Batch urgency classification.
//!
//! Projects the expected end of a patient's current aligner batch and flags
//! how close (or past) it is. This is independent of the per-aligner
//! reminder cadence: `wear_days_per_aligner` and `batch_start_date` drive
//! the projection, `change_frequency` drives reminders.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days before the expected batch end at which a patient is flagged.
pub const ENDING_SOON_WINDOW_DAYS: i64 = 14;

/// Coarse classification of a patient's overall batch timeline.
///
/// Derived on every read; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyStatus {
    OnTrack,
    EndingSoon,
    Overdue,
    AwaitingReevaluation,
}

impl UrgencyStatus {
    /// Human-readable label for display in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::EndingSoon => "Ending soon",
            Self::Overdue => "Overdue",
            Self::AwaitingReevaluation => "Awaiting reevaluation",
        }
    }
}

/// Classify a patient's batch status as of `today`.
///
/// Rules, in order:
///
/// 1. No (or zero) `total_aligners` -> [`UrgencyStatus::AwaitingReevaluation`].
/// 2. With both batch anchors present, project
///    `expected_end = batch_start + total_aligners * wear_days_per_aligner`
///    and compare to `today`: past -> `Overdue`, within
///    [`ENDING_SOON_WINDOW_DAYS`] -> `EndingSoon`, else `OnTrack`.
/// 3. Incomplete anchor data -> `OnTrack`. This fallback means
///    "insufficient data to flag risk", not a schedule guarantee.
pub fn classify(
    total_aligners: Option<i32>,
    batch_start_date: Option<NaiveDate>,
    wear_days_per_aligner: Option<i32>,
    today: NaiveDate,
) -> UrgencyStatus {
    let total = match total_aligners {
        Some(n) if n > 0 => n,
        _ => return UrgencyStatus::AwaitingReevaluation,
    };

    let (batch_start, wear_days) = match (batch_start_date, wear_days_per_aligner) {
        (Some(start), Some(wear)) => (start, wear),
        _ => return UrgencyStatus::OnTrack,
    };

    let expected_end = batch_start + Duration::days(i64::from(total) * i64::from(wear_days));
    let diff_days = (expected_end - today).num_days();

    if diff_days < 0 {
        UrgencyStatus::Overdue
    } else if diff_days <= ENDING_SOON_WINDOW_DAYS {
        UrgencyStatus::EndingSoon
    } else {
        UrgencyStatus::OnTrack
    }
}
