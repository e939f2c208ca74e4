// Live file-lifecycle tests for branches against a real Postgres instance,
// gated behind LIVE_INTEGRATION_TESTS=true. Uploads land in a temp directory
// so assertions can watch the backing files directly.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use branch_cell::models::CreateBranch;
use branch_cell::services::branch::BranchService;
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
async fn deleting_a_branch_removes_its_image_and_gallery_files() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let dir = TempDir::new().unwrap();
    let state = live_state(dir.path()).await;
    let service = BranchService::new(&state);

    let image = state.media.store("front.png", "image/png", b"png").await.unwrap();
    let g1 = state.media.store("hall.jpg", "image/jpeg", b"jpg").await.unwrap();
    let g2 = state.media.store("chair.jpg", "image/jpeg", b"jpg").await.unwrap();

    let branch = service
        .create(CreateBranch {
            name: "Downtown".to_string(),
            image: Some(image.clone()),
            address: None,
            phone: None,
            email: None,
            gallery: vec![g1.clone(), g2.clone()],
            latitude: None,
            longitude: None,
        })
        .await
        .unwrap();

    for path in [&image, &g1, &g2] {
        assert!(backing_file(dir.path(), path).exists());
    }

    service.delete(branch.id).await.unwrap();

    for path in [&image, &g1, &g2] {
        assert!(!backing_file(dir.path(), path).exists());
    }
}

#[tokio::test]
async fn deleting_a_missing_branch_is_not_found_and_leaves_storage_untouched() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let dir = TempDir::new().unwrap();
    let state = live_state(dir.path()).await;
    let service = BranchService::new(&state);

    let image = state.media.store("keep.png", "image/png", b"png").await.unwrap();
    service
        .create(CreateBranch {
            name: "Uptown".to_string(),
            image: Some(image.clone()),
            address: None,
            phone: None,
            email: None,
            gallery: vec![],
            latitude: None,
            longitude: None,
        })
        .await
        .unwrap();

    let missing = service.delete(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert!(backing_file(dir.path(), &image).exists());
}
