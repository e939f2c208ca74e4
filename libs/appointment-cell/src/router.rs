use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use shared_state::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route(
            "/{id}",
            delete(handlers::delete_appointment).patch(handlers::update_status),
        )
        .route(
            "/doctor/{doctor_id}/date/{date}",
            get(handlers::booked_slots),
        )
        .with_state(state)
}
