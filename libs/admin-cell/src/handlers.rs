use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use shared_models::AppError;
use shared_state::AppState;

use crate::models::LoginRequest;
use crate::services::auth::AdminAuthService;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = AdminAuthService::new(&state).login(request).await?;
    Ok(Json(response))
}
