//! Aligner progression arithmetic.
//!
//! Derives, for a given reference date, which aligner a patient is on and
//! when the next change is due. All inputs are date-only values; callers
//! must never pass anything carrying a client-local time-of-day, otherwise
//! day counts drift by one near midnight.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Derived progression state for one patient as of a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignerProgress {
    /// 1-based aligner the patient should currently be wearing.
    pub current_aligner: i32,
    /// Whole days until the next scheduled change.
    pub days_until_next_change: i64,
    /// Calendar date of the next scheduled change.
    pub next_change_date: NaiveDate,
}

/// Compute aligner progression as of `today`.
///
/// With a start date in the future the patient is treated as being on
/// aligner 1 with a full wear period ahead of them. Otherwise:
///
/// ```text
/// days_since_start       = today - treatment_start  (floor, whole days)
/// remainder              = days_since_start % change_frequency
/// days_until_next_change = change_frequency - remainder
/// current_aligner        = days_since_start / change_frequency + 1
/// ```
///
/// Pure and deterministic for a fixed input triple.
///
/// # Panics
///
/// Panics if `change_frequency < 1`. That invariant is enforced at the API
/// boundary; reaching this function with a non-positive frequency is a bug.
pub fn progress_as_of(
    treatment_start: NaiveDate,
    change_frequency: i32,
    today: NaiveDate,
) -> AlignerProgress {
    assert!(
        change_frequency >= 1,
        "change_frequency must be >= 1, got {change_frequency}"
    );
    let freq = i64::from(change_frequency);
    let days_since_start = (today - treatment_start).num_days();

    if days_since_start < 0 {
        // Treatment has not begun yet.
        return AlignerProgress {
            current_aligner: 1,
            days_until_next_change: freq,
            next_change_date: today + Duration::days(freq),
        };
    }

    let remainder = days_since_start % freq;
    let days_until_next_change = freq - remainder;

    AlignerProgress {
        current_aligner: (days_since_start / freq) as i32 + 1,
        days_until_next_change,
        next_change_date: today + Duration::days(days_until_next_change),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_day_is_aligner_one() {
        let start = date(2024, 1, 1);
        let p = progress_as_of(start, 14, start);
        assert_eq!(p.current_aligner, 1);
        assert_eq!(p.days_until_next_change, 14);
        assert_eq!(p.next_change_date, date(2024, 1, 15));
    }

    #[test]
    fn future_start_date_counts_from_today() {
        let p = progress_as_of(date(2024, 6, 1), 10, date(2024, 5, 20));
        assert_eq!(p.current_aligner, 1);
        assert_eq!(p.days_until_next_change, 10);
        assert_eq!(p.next_change_date, date(2024, 5, 30));
    }

    #[test]
    fn mid_period_progression() {
        // Day 5 of a 14-day cadence: still aligner 1, 9 days to go.
        let p = progress_as_of(date(2024, 1, 1), 14, date(2024, 1, 6));
        assert_eq!(p.current_aligner, 1);
        assert_eq!(p.days_until_next_change, 9);
        assert_eq!(p.next_change_date, date(2024, 1, 15));
    }

    #[test]
    fn exact_boundary_resets_the_countdown() {
        // today == start + 2 * 14 days: the countdown shows a full period.
        let p = progress_as_of(date(2024, 1, 1), 14, date(2024, 1, 29));
        assert_eq!(p.current_aligner, 3);
        assert_eq!(p.days_until_next_change, 14);
        assert_eq!(p.next_change_date, date(2024, 2, 12));
    }

    #[test]
    fn aligner_number_is_monotonic_across_boundaries() {
        let start = date(2024, 1, 1);
        let freq = 7;
        for k in 0..20 {
            let today = start + Duration::days(i64::from(k) * i64::from(freq));
            let p = progress_as_of(start, freq, today);
            assert_eq!(p.current_aligner, k + 1);
        }
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let a = progress_as_of(date(2023, 11, 5), 12, date(2024, 3, 2));
        let b = progress_as_of(date(2023, 11, 5), 12, date(2024, 3, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn daily_cadence() {
        let p = progress_as_of(date(2024, 1, 1), 1, date(2024, 1, 4));
        assert_eq!(p.current_aligner, 4);
        assert_eq!(p.days_until_next_change, 1);
    }

    #[test]
    #[should_panic(expected = "change_frequency must be >= 1")]
    fn zero_frequency_panics() {
        progress_as_of(date(2024, 1, 1), 0, date(2024, 1, 2));
    }
}
