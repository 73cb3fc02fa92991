//! Integration tests for the message-log repository.
//!
//! The exact `message_content` string is the duplicate-reminder key, so
//! the lookup must match byte-for-byte and nothing else.

use chrono::NaiveDate;
use sqlx::PgPool;

use alinea_core::types::DbId;
use alinea_db::models::message_log::CreateMessageLog;
use alinea_db::models::patient::CreatePatient;
use alinea_db::repositories::{MessageLogRepo, PatientRepo};

async fn seed_patient(pool: &PgPool, rut: &str, name: &str) -> DbId {
    let input = CreatePatient {
        rut: rut.to_string(),
        full_name: name.to_string(),
        phone: "+56912345678".to_string(),
        email: format!("{}@example.com", rut.replace('-', "")),
        treatment_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        change_frequency: 7,
        status: None,
        current_aligner: None,
        total_aligners: None,
        wear_days_per_aligner: None,
        batch_start_date: None,
        avatar_url: None,
        diagnosis: None,
        treatment_plan: None,
        observations: None,
    };
    PatientRepo::create(pool, None, &input).await.unwrap().id
}

#[sqlx::test(migrations = "./migrations")]
async fn exact_content_match_only(pool: PgPool) {
    let patient_id = seed_patient(&pool, "1-9", "Ana Rojas").await;

    MessageLogRepo::insert(
        &pool,
        &CreateMessageLog {
            patient_id,
            message_content: "Reminder for Aligner #3.".to_string(),
            status: "SENT".to_string(),
        },
    )
    .await
    .unwrap();

    let hit = MessageLogRepo::find_by_content(&pool, patient_id, "Reminder for Aligner #3.")
        .await
        .unwrap();
    assert!(hit.is_some());

    // A different aligner number, or a formatting drift, is not a hit.
    for miss in [
        "Reminder for Aligner #4.",
        "Reminder for Aligner #3",
        "reminder for aligner #3.",
    ] {
        assert!(
            MessageLogRepo::find_by_content(&pool, patient_id, miss)
                .await
                .unwrap()
                .is_none(),
            "{miss:?} must not match"
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn lookup_is_scoped_per_patient(pool: PgPool) {
    let first = seed_patient(&pool, "1-9", "Ana Rojas").await;
    let second = seed_patient(&pool, "2-7", "Bruno Soto").await;

    MessageLogRepo::insert(
        &pool,
        &CreateMessageLog {
            patient_id: first,
            message_content: "Reminder for Aligner #2.".to_string(),
            status: "SENT".to_string(),
        },
    )
    .await
    .unwrap();

    // The same content for another patient is not a duplicate.
    assert!(
        MessageLogRepo::find_by_content(&pool, second, "Reminder for Aligner #2.")
            .await
            .unwrap()
            .is_none()
    );

    assert_eq!(MessageLogRepo::count_for_patient(&pool, first).await.unwrap(), 1);
    assert_eq!(MessageLogRepo::count_for_patient(&pool, second).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_joins_patient_name_newest_first(pool: PgPool) {
    let patient_id = seed_patient(&pool, "1-9", "Ana Rojas").await;

    for n in 1..=3 {
        MessageLogRepo::insert(
            &pool,
            &CreateMessageLog {
                patient_id,
                message_content: format!("Reminder for Aligner #{n}."),
                status: "SENT".to_string(),
            },
        )
        .await
        .unwrap();
    }

    let logs = MessageLogRepo::list_with_patient(&pool).await.unwrap();
    assert_eq!(logs.len(), 3);
    assert!(logs.iter().all(|l| l.patient_name == "Ana Rojas"));
    assert!(logs.windows(2).all(|w| w[0].sent_at >= w[1].sent_at));
}
