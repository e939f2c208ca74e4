use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use shared_state::AppState;

use crate::handlers;

pub fn branch_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_branches).post(handlers::create_branch))
        .route(
            "/{id}",
            delete(handlers::delete_branch).put(handlers::update_branch),
        )
        .with_state(state)
}
