//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! JSON uses camelCase field names throughout; the browser dashboard and
//! the mobile clients both expect that convention.

pub mod appointment;
pub mod clinical_record;
pub mod message_log;
pub mod note;
pub mod patient;
pub mod patient_image;
pub mod user;
