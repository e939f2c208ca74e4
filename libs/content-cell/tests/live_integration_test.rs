// Live file-lifecycle tests for partner logos against a real Postgres
// instance, gated behind LIVE_INTEGRATION_TESTS=true.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use content_cell::models::CreatePartner;
use content_cell::services::showcase::ShowcaseService;
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
async fn deleting_a_partner_removes_its_logo_file() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let dir = TempDir::new().unwrap();
    let state = live_state(dir.path()).await;
    let service = ShowcaseService::new(&state);

    let logo = state.media.store("logo.png", "image/png", b"png").await.unwrap();
    let partner = service
        .create_partner(CreatePartner {
            name: "Acme Dental Supplies".to_string(),
            logo: Some(logo.clone()),
            website: None,
        })
        .await
        .unwrap();

    assert!(backing_file(dir.path(), &logo).exists());

    service.delete_partner(partner.id).await.unwrap();
    assert!(!backing_file(dir.path(), &logo).exists());
}

#[tokio::test]
async fn deleting_a_missing_partner_is_not_found_and_leaves_storage_untouched() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let dir = TempDir::new().unwrap();
    let state = live_state(dir.path()).await;
    let service = ShowcaseService::new(&state);

    let logo = state.media.store("kept.png", "image/png", b"png").await.unwrap();
    service
        .create_partner(CreatePartner {
            name: "Keeper Labs".to_string(),
            logo: Some(logo.clone()),
            website: None,
        })
        .await
        .unwrap();

    let missing = service.delete_partner(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert!(backing_file(dir.path(), &logo).exists());
}
