//! Boundary validation helpers.
//!
//! These run in the API layer before any calculator sees the input; the
//! calculators themselves assume validated data and assert on contract
//! violations. Helpers return `Result<(), String>` so handlers can map the
//! message straight onto a 400 response.

use chrono::NaiveDate;

/// Minimum allowed aligner change frequency, in days.
pub const MIN_CHANGE_FREQUENCY: i32 = 1;

/// Allowed patient lifecycle states.
pub const PATIENT_STATUSES: [&str; 3] = ["ACTIVE", "PAUSED", "FINISHED"];

/// Allowed appointment states.
pub const APPOINTMENT_STATUSES: [&str; 3] = ["SCHEDULED", "COMPLETED", "CANCELLED"];

/// Allowed patient image kinds.
pub const IMAGE_TYPES: [&str; 2] = ["PHOTO", "XRAY"];

/// Validate the aligner change cadence.
pub fn validate_change_frequency(frequency: i32) -> Result<(), String> {
    if frequency < MIN_CHANGE_FREQUENCY {
        return Err(format!(
            "changeFrequency must be at least {MIN_CHANGE_FREQUENCY} day(s), got {frequency}"
        ));
    }
    Ok(())
}

/// Validate a patient status string.
pub fn validate_patient_status(status: &str) -> Result<(), String> {
    validate_one_of(status, &PATIENT_STATUSES, "status")
}

/// Validate an appointment status string.
pub fn validate_appointment_status(status: &str) -> Result<(), String> {
    validate_one_of(status, &APPOINTMENT_STATUSES, "status")
}

/// Validate a patient image type string.
pub fn validate_image_type(image_type: &str) -> Result<(), String> {
    validate_one_of(image_type, &IMAGE_TYPES, "type")
}

fn validate_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), String> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(format!(
        "Invalid {field} '{value}'. Allowed values: {}",
        allowed.join(", ")
    ))
}

/// Parse a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps are truncated to their UTC date; the time-of-day is discarded
/// so all downstream day arithmetic works on date-only values.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(ts.to_utc().date_naive());
    }
    Err(format!(
        "Invalid date '{value}'. Expected YYYY-MM-DD or an RFC 3339 timestamp"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_frequency_of_one_is_the_floor() {
        assert!(validate_change_frequency(1).is_ok());
        assert!(validate_change_frequency(14).is_ok());
        assert!(validate_change_frequency(0).is_err());
        assert!(validate_change_frequency(-7).is_err());
    }

    #[test]
    fn status_sets_are_closed() {
        assert!(validate_patient_status("ACTIVE").is_ok());
        assert!(validate_patient_status("active").is_err());
        assert!(validate_appointment_status("CANCELLED").is_ok());
        assert!(validate_appointment_status("DONE").is_err());
        assert!(validate_image_type("XRAY").is_ok());
        assert!(validate_image_type("SCAN").is_err());
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        let d = parse_calendar_date("2024-03-05").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        // Timestamp truncates to the UTC date.
        let d = parse_calendar_date("2024-03-05T23:30:00-03:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());

        assert!(parse_calendar_date("05/03/2024").is_err());
    }
}
