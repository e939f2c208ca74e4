use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use shared_state::AppState;

use crate::handlers;

pub fn feedback_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_feedbacks).post(handlers::create_feedback))
        .route(
            "/{id}",
            delete(handlers::delete_feedback).put(handlers::update_feedback),
        )
        .with_state(state)
}

pub fn video_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_videos).post(handlers::create_video))
        .route(
            "/{id}",
            delete(handlers::delete_video).put(handlers::update_video),
        )
        .with_state(state)
}

pub fn partner_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_partners).post(handlers::create_partner))
        .route(
            "/{id}",
            delete(handlers::delete_partner).put(handlers::update_partner),
        )
        .with_state(state)
}

pub fn price_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_prices).post(handlers::create_price))
        .route(
            "/{id}",
            delete(handlers::delete_price).put(handlers::update_price),
        )
        .with_state(state)
}

pub fn timeline_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_timeline).post(handlers::create_timeline_item))
        .route(
            "/{id}",
            delete(handlers::delete_timeline_item).put(handlers::update_timeline_item),
        )
        .with_state(state)
}

pub fn faq_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_faqs).post(handlers::create_faq))
        .route(
            "/{id}",
            delete(handlers::delete_faq).put(handlers::update_faq),
        )
        .with_state(state)
}
