// Live file-lifecycle tests for clinics and their doctors against a real
// Postgres instance, gated behind LIVE_INTEGRATION_TESTS=true.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use clinic_cell::models::{CreateClinic, CreateDoctor};
use clinic_cell::services::{clinic::ClinicService, doctor::DoctorService};
use shared_config::AppConfig;
use shared_database::{initialize_schema, pool};
use shared_models::AppError;
use shared_state::AppState;

fn should_run_live_tests() -> bool {
    std::env::var("LIVE_INTEGRATION_TESTS").unwrap_or_default() == "true"
}

async fn live_state(upload_dir: &Path) -> Arc<AppState> {
    let mut config = AppConfig::from_env();
    config.upload_dir = upload_dir.to_string_lossy().into_owned();
    let pool = pool::connect(&config)
        .await
        .expect("live tests need a reachable database");
    initialize_schema(&pool, &config).await;
    Arc::new(AppState::new(config, pool))
}

fn backing_file(upload_dir: &Path, public_path: &str) -> std::path::PathBuf {
    upload_dir.join(public_path.strip_prefix("/uploads/").unwrap())
}

#[tokio::test]
async fn deleting_a_clinic_removes_cascaded_doctor_image_files() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let dir = TempDir::new().unwrap();
    let state = live_state(dir.path()).await;
    let clinics = ClinicService::new(&state);
    let doctors = DoctorService::new(&state);

    let clinic_image = state.media.store("clinic.png", "image/png", b"png").await.unwrap();
    let doctor_image = state.media.store("doctor.jpg", "image/jpeg", b"jpg").await.unwrap();

    let clinic = clinics
        .create(CreateClinic {
            name: "Cascade Clinic".to_string(),
            phone: None,
            image: Some(clinic_image.clone()),
        })
        .await
        .unwrap();
    let doctor = doctors
        .create(CreateDoctor {
            name: "Dr. Cascade".to_string(),
            clinic_id: clinic.id,
            image: Some(doctor_image.clone()),
        })
        .await
        .unwrap();

    clinics.delete(clinic.id).await.unwrap();

    // The doctor row cascaded away with the clinic, files included.
    let gone = doctors.get(doctor.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
    assert!(!backing_file(dir.path(), &clinic_image).exists());
    assert!(!backing_file(dir.path(), &doctor_image).exists());
}

#[tokio::test]
async fn deleting_a_missing_clinic_is_not_found_and_leaves_storage_untouched() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let dir = TempDir::new().unwrap();
    let state = live_state(dir.path()).await;
    let clinics = ClinicService::new(&state);

    let image = state.media.store("still-here.png", "image/png", b"png").await.unwrap();
    clinics
        .create(CreateClinic {
            name: "Standing Clinic".to_string(),
            phone: None,
            image: Some(image.clone()),
        })
        .await
        .unwrap();

    let missing = clinics.delete(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert!(backing_file(dir.path(), &image).exists());
}
