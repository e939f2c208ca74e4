// Live booking-flow tests against a real Postgres instance.
//
// Gated behind LIVE_INTEGRATION_TESTS=true plus the usual DATABASE_* env
// vars; a plain `cargo test` skips them. SMS stays unconfigured here, so
// bookings report smsStatus "failed" without touching any provider.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use appointment_cell::models::{
    AppointmentError, AppointmentListParams, BookAppointmentRequest,
};
use appointment_cell::services::booking::BookingService;
use shared_config::AppConfig;
use shared_database::{initialize_schema, pool};
use shared_state::AppState;

fn should_run_live_tests() -> bool {
    std::env::var("LIVE_INTEGRATION_TESTS").unwrap_or_default() == "true"
}

async fn live_state() -> Arc<AppState> {
    let config = AppConfig::from_env();
    let pool = pool::connect(&config)
        .await
        .expect("live tests need a reachable database");
    initialize_schema(&pool, &config).await;
    Arc::new(AppState::new(config, pool))
}

async fn seed_doctor(state: &AppState) -> Uuid {
    let clinic_id = Uuid::new_v4();
    sqlx::query("INSERT INTO clinics (id, name, phone) VALUES ($1, $2, $3)")
        .bind(clinic_id)
        .bind(format!("Test Clinic {clinic_id}"))
        .bind("5320000000")
        .execute(&state.pool)
        .await
        .unwrap();

    let doctor_id = Uuid::new_v4();
    sqlx::query("INSERT INTO doctors (id, name, clinic_id) VALUES ($1, $2, $3)")
        .bind(doctor_id)
        .bind("Dr. Test")
        .bind(clinic_id)
        .execute(&state.pool)
        .await
        .unwrap();

    doctor_id
}

fn booking(doctor_id: Uuid, date: NaiveDate, slot: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        doctor_id,
        appointment_date: date,
        time_slot: slot.to_string(),
        patient_name: "Live Test Patient".to_string(),
        patient_phone: "05321234567".to_string(),
    }
}

#[tokio::test]
async fn booking_occupies_the_slot_until_cancelled() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let state = live_state().await;
    let service = BookingService::new(&state);
    let doctor_id = seed_doctor(&state).await;
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let booked = service.book(booking(doctor_id, date, "10:00")).await.unwrap();
    assert_eq!(booked.appointment.status, "confirmed");
    assert_eq!(booked.appointment.doctor_name, "Dr. Test");

    let slots = service.booked_slots(doctor_id, date).await.unwrap();
    assert_eq!(slots, vec!["10:00".to_string()]);

    // Same doctor/date/slot is rejected while the booking is active.
    let dup = service.book(booking(doctor_id, date, "10:00")).await;
    assert!(matches!(dup, Err(AppointmentError::SlotTaken)));

    // Cancelling releases the slot.
    service
        .update_status(booked.appointment.id, "cancelled")
        .await
        .unwrap();
    let slots = service.booked_slots(doctor_id, date).await.unwrap();
    assert!(slots.is_empty());

    service.book(booking(doctor_id, date, "10:00")).await.unwrap();
}

#[tokio::test]
async fn booking_unknown_doctor_is_rejected_without_a_row() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let state = live_state().await;
    let service = BookingService::new(&state);
    let ghost = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

    let result = service.book(booking(ghost, date, "11:00")).await;
    assert!(matches!(result, Err(AppointmentError::DoctorNotFound)));

    let listed = service
        .list(AppointmentListParams {
            status: None,
            doctor_id: Some(ghost),
        })
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn invalid_status_update_leaves_the_row_untouched() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let state = live_state().await;
    let service = BookingService::new(&state);
    let doctor_id = seed_doctor(&state).await;
    let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

    let booked = service.book(booking(doctor_id, date, "09:30")).await.unwrap();

    let result = service.update_status(booked.appointment.id, "rescheduled").await;
    assert!(matches!(result, Err(AppointmentError::InvalidStatus(_))));

    let listed = service
        .list(AppointmentListParams {
            status: Some("confirmed".to_string()),
            doctor_id: Some(doctor_id),
        })
        .await
        .unwrap();
    assert!(listed.iter().any(|a| a.id == booked.appointment.id));

    // Unknown ids surface as not-found on every mutation.
    let missing = service.update_status(Uuid::new_v4(), "cancelled").await;
    assert!(matches!(missing, Err(AppointmentError::NotFound)));
    let missing = service.delete(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppointmentError::NotFound)));
}
