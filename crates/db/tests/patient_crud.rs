//! Integration tests for the patient repository.
//!
//! Exercises the repository layer against a real database:
//! - Create, read, update, delete round-trips
//! - Partial updates leaving untouched columns alone
//! - Unique constraint violations (RUT)
//! - Active-patient listing and dashboard counts

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;

use alinea_db::models::patient::{CreatePatient, UpdatePatient};
use alinea_db::repositories::PatientRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_patient(rut: &str, name: &str) -> CreatePatient {
    CreatePatient {
        rut: rut.to_string(),
        full_name: name.to_string(),
        phone: "+56912345678".to_string(),
        email: format!("{}@example.com", rut.replace(['.', '-'], "")),
        treatment_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        change_frequency: 14,
        status: None,
        current_aligner: None,
        total_aligners: Some(20),
        wear_days_per_aligner: Some(14),
        batch_start_date: None,
        avatar_url: None,
        diagnosis: None,
        treatment_plan: None,
        observations: None,
    }
}

fn empty_update() -> UpdatePatient {
    UpdatePatient {
        rut: None,
        full_name: None,
        phone: None,
        email: None,
        status: None,
        treatment_start_date: None,
        change_frequency: None,
        current_aligner: None,
        total_aligners: None,
        wear_days_per_aligner: None,
        batch_start_date: None,
        diagnosis: None,
        treatment_plan: None,
        observations: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_and_fetch_roundtrip(pool: PgPool) {
    let created = PatientRepo::create(&pool, None, &new_patient("12.345.678-5", "Ana Rojas"))
        .await
        .unwrap();

    assert_eq!(created.status, "ACTIVE", "status should default to ACTIVE");
    assert_eq!(created.change_frequency, 14);
    assert!(created.current_aligner.is_none());

    let fetched = PatientRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("patient should exist");
    assert_eq!(fetched.rut, "12.345.678-5");
    assert_eq!(fetched.full_name, "Ana Rojas");
    assert_eq!(fetched.total_aligners, Some(20));
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_leaves_other_columns(pool: PgPool) {
    let created = PatientRepo::create(&pool, None, &new_patient("9.876.543-3", "Bruno Soto"))
        .await
        .unwrap();

    let update = UpdatePatient {
        current_aligner: Some(7),
        ..empty_update()
    };
    let updated = PatientRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .expect("patient should exist");

    assert_eq!(updated.current_aligner, Some(7));
    // Nothing else moved.
    assert_eq!(updated.full_name, "Bruno Soto");
    assert_eq!(updated.change_frequency, 14);
    assert_eq!(updated.status, "ACTIVE");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_rut_violates_unique_constraint(pool: PgPool) {
    PatientRepo::create(&pool, None, &new_patient("11.111.111-1", "Carla Díaz"))
        .await
        .unwrap();

    let mut dup = new_patient("11.111.111-1", "Otra Persona");
    dup.email = "otra@example.com".to_string();
    let err = PatientRepo::create(&pool, None, &dup).await.unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_patients_rut"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn list_active_excludes_paused_and_finished(pool: PgPool) {
    let active = PatientRepo::create(&pool, None, &new_patient("1-9", "Activa Uno"))
        .await
        .unwrap();

    let mut paused = new_patient("2-7", "Pausada Dos");
    paused.status = Some("PAUSED".to_string());
    PatientRepo::create(&pool, None, &paused).await.unwrap();

    let mut finished = new_patient("3-5", "Terminada Tres");
    finished.status = Some("FINISHED".to_string());
    PatientRepo::create(&pool, None, &finished).await.unwrap();

    let listed = PatientRepo::list_active(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, active.id);

    assert_eq!(PatientRepo::count(&pool).await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_row(pool: PgPool) {
    let created = PatientRepo::create(&pool, None, &new_patient("4-3", "Diego Pino"))
        .await
        .unwrap();

    assert!(PatientRepo::delete(&pool, created.id).await.unwrap());
    assert!(PatientRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
    // Deleting again reports nothing removed.
    assert!(!PatientRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn invalid_status_rejected_by_check_constraint(pool: PgPool) {
    let mut input = new_patient("5-1", "Elena Vera");
    input.status = Some("ARCHIVED".to_string());

    let err = PatientRepo::create(&pool, None, &input).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23514"),
        "expected a check violation"
    );
}
