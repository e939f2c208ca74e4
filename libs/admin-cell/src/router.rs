use std::sync::Arc;

use axum::{routing::post, Router};

use shared_state::AppState;

use crate::handlers;

pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(handlers::login))
        .with_state(state)
}
