pub mod appointments;
pub mod auth;
pub mod clinical_records;
pub mod message_logs;
pub mod notes;
pub mod patient_images;
pub mod patients;
