use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use shared_state::AppState;

use crate::handlers;

pub fn clinic_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_clinics).post(handlers::create_clinic))
        .route(
            "/{id}",
            delete(handlers::delete_clinic).put(handlers::update_clinic),
        )
        .with_state(state)
}

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route(
            "/{id}",
            delete(handlers::delete_doctor).put(handlers::update_doctor),
        )
        .with_state(state)
}
