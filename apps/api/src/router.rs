use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use admin_cell::router::admin_routes;
use appointment_cell::router::appointment_routes;
use branch_cell::router::branch_routes;
use clinic_cell::router::{clinic_routes, doctor_routes};
use content_cell::router::{
    faq_routes, feedback_routes, partner_routes, price_routes, timeline_routes, video_routes,
};
use shared_state::AppState;
use treatment_cell::router::treatment_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/clinics", clinic_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/treatments", treatment_routes(state.clone()))
        .nest("/branches", branch_routes(state.clone()))
        .nest("/feedbacks", feedback_routes(state.clone()))
        .nest("/videos", video_routes(state.clone()))
        .nest("/partners", partner_routes(state.clone()))
        .nest("/prices", price_routes(state.clone()))
        .nest("/timeline", timeline_routes(state.clone()))
        .nest("/faqs", faq_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()));

    Router::new()
        .route("/", get(|| async { "Dental clinic API is running!" }))
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
}
