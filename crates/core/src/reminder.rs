//! Reminder boundary rules and canonical message formats.
//!
//! A patient is due a change reminder on every `change_frequency`-day
//! multiple after `treatment_start_date`, excluding day zero. Duplicate
//! suppression relies on exact equality of the logged content string, so
//! [`log_content`] must stay byte-stable: changing its format invalidates
//! dedup for every previously logged aligner.

use chrono::NaiveDate;

/// Whole days from the treatment start to `today` (negative before start).
pub fn days_since_start(treatment_start: NaiveDate, today: NaiveDate) -> i64 {
    (today - treatment_start).num_days()
}

/// Returns the aligner number a reminder is due for, or `None` when today
/// is not a cadence boundary.
///
/// Due iff `days_since_start > 0 && days_since_start % change_frequency == 0`.
/// The start day itself never triggers a reminder.
pub fn due_aligner(days_since_start: i64, change_frequency: i32) -> Option<i32> {
    let freq = i64::from(change_frequency);
    if freq < 1 || days_since_start <= 0 || days_since_start % freq != 0 {
        return None;
    }
    Some((days_since_start / freq) as i32 + 1)
}

/// Canonical message-log content for one aligner reminder.
///
/// This string is the dedup key: the send pass skips any patient that
/// already has a log row with exactly this content.
pub fn log_content(aligner_number: i32) -> String {
    format!("Reminder for Aligner #{aligner_number}.")
}

/// The WhatsApp message body shown to the patient.
pub fn whatsapp_body(full_name: &str, aligner_number: i32) -> String {
    format!(
        "¡Hola {full_name}! Es hora de cambiar a tu alineador número {aligner_number}. ¡Sigue así!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_reminder_on_day_zero() {
        for freq in [1, 7, 14, 30] {
            assert_eq!(due_aligner(0, freq), None);
        }
    }

    #[test]
    fn no_reminder_before_treatment_starts() {
        assert_eq!(due_aligner(-3, 7), None);
    }

    #[test]
    fn boundary_true_exactly_at_cadence_multiples() {
        assert_eq!(due_aligner(14, 14), Some(2));
        assert_eq!(due_aligner(28, 14), Some(3));
        assert_eq!(due_aligner(13, 14), None);
        assert_eq!(due_aligner(15, 14), None);
    }

    #[test]
    fn boundary_from_calendar_dates() {
        let start = date(2024, 1, 1);
        let days = days_since_start(start, date(2024, 1, 15));
        assert_eq!(days, 14);
        assert_eq!(due_aligner(days, 14), Some(2));
    }

    #[test]
    fn log_content_is_byte_stable() {
        assert_eq!(log_content(4), "Reminder for Aligner #4.");
        assert_eq!(log_content(4), log_content(4));
    }

    #[test]
    fn whatsapp_body_mentions_name_and_number() {
        let body = whatsapp_body("Ana Pérez", 6);
        assert!(body.contains("Ana Pérez"));
        assert!(body.contains('6'));
    }
}
