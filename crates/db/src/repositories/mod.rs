//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod clinical_record_repo;
pub mod message_log_repo;
pub mod note_repo;
pub mod patient_image_repo;
pub mod patient_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use clinical_record_repo::ClinicalRecordRepo;
pub use message_log_repo::MessageLogRepo;
pub use note_repo::NoteRepo;
pub use patient_image_repo::PatientImageRepo;
pub use patient_repo::PatientRepo;
pub use user_repo::UserRepo;
