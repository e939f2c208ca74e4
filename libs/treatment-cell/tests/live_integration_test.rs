// Live slug-uniqueness tests against a real Postgres instance, gated behind
// LIVE_INTEGRATION_TESTS=true like the other live suites.

use std::sync::Arc;

use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{initialize_schema, pool};
use shared_models::AppError;
use shared_state::AppState;
use treatment_cell::models::CreateTreatment;
use treatment_cell::services::treatment::TreatmentService;

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

fn treatment(slug: &str, title: &str) -> CreateTreatment {
    CreateTreatment {
        title: title.to_string(),
        short_description: None,
        long_description: None,
        content: None,
        image: None,
        slug: slug.to_string(),
        seo_title: None,
        seo_description: None,
        is_featured: false,
        sort_order: 0,
    }
}

#[tokio::test]
async fn colliding_slug_is_rejected_without_a_second_row() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let state = live_state().await;
    let service = TreatmentService::new(&state);
    let slug = format!("implants-{}", Uuid::new_v4());

    service.create(treatment(&slug, "Dental Implants")).await.unwrap();

    let duplicate = service.create(treatment(&slug, "Implants Again")).await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM treatments WHERE slug = $1")
        .bind(&slug)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // The stored row is the original, addressable by its slug.
    let stored = service.get_by_slug(&slug).await.unwrap();
    assert_eq!(stored.title, "Dental Implants");
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    if !should_run_live_tests() {
        println!("Skipping live integration tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return;
    }

    let state = live_state().await;
    let service = TreatmentService::new(&state);

    let missing = service.get_by_slug(&format!("no-such-{}", Uuid::new_v4())).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
