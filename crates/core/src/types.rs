//! Primitive aliases shared by every crate in the workspace.

/// Row identifier. The schema uses BIGSERIAL keys throughout, so ids are
/// `i64` end to end (database, JSON bodies, JWT subject).
pub type DbId = i64;

/// Instant in time, always UTC. Calendar-only values (treatment start,
/// image session days) use `chrono::NaiveDate` instead.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
