use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use shared_state::AppState;

use crate::handlers;

pub fn treatment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_treatments).post(handlers::create_treatment),
        )
        .route(
            "/{id}",
            delete(handlers::delete_treatment).put(handlers::update_treatment),
        )
        .route("/slug/{slug}", get(handlers::get_treatment_by_slug))
        .with_state(state)
}
