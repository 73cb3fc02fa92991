//! Alinea domain logic.
//!
//! Pure calculation and validation code shared by the persistence, API and
//! notification crates. Nothing here performs I/O, and every time-dependent
//! function takes the reference date ("today") as an explicit argument so
//! callers and tests control the clock.

pub mod error;
pub mod progression;
pub mod reminder;
pub mod types;
pub mod urgency;
pub mod validation;
