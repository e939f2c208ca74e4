use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use shared_media::UploadForm;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{CreateTreatment, UpdateTreatment};
use crate::services::treatment::TreatmentService;

fn parse_content(form: &UploadForm) -> Result<Option<serde_json::Value>, AppError> {
    match form.text("content") {
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| AppError::ValidationError(format!("Invalid content JSON: {e}"))),
        None => Ok(None),
    }
}

fn parse_sort_order(form: &UploadForm) -> Result<Option<i32>, AppError> {
    match form.text("sort_order") {
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::ValidationError("Invalid sort_order".to_string())),
        None => Ok(None),
    }
}

pub async fn list_treatments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let treatments = TreatmentService::new(&state).list().await?;
    Ok(Json(treatments))
}

pub async fn get_treatment_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let treatment = TreatmentService::new(&state).get_by_slug(&slug).await?;
    Ok(Json(treatment))
}

pub async fn create_treatment(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let input = CreateTreatment {
        title: form.require("title")?.to_string(),
        short_description: form.text("short_description").map(str::to_string),
        long_description: form.text("long_description").map(str::to_string),
        content: parse_content(&form)?,
        image: form.image_or_existing("image"),
        slug: form.require("slug")?.to_string(),
        seo_title: form.text("seo_title").map(str::to_string),
        seo_description: form.text("seo_description").map(str::to_string),
        is_featured: form.text("is_featured").map(|v| v == "true").unwrap_or(false),
        sort_order: parse_sort_order(&form)?.unwrap_or(0),
    };

    let treatment = TreatmentService::new(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(treatment)))
}

pub async fn update_treatment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let input = UpdateTreatment {
        title: form.text("title").map(str::to_string),
        short_description: form.text("short_description").map(str::to_string),
        long_description: form.text("long_description").map(str::to_string),
        content: parse_content(&form)?,
        image: form.image_or_existing("image"),
        slug: form.text("slug").map(str::to_string),
        seo_title: form.text("seo_title").map(str::to_string),
        seo_description: form.text("seo_description").map(str::to_string),
        is_featured: form.text("is_featured").map(|v| v == "true"),
        sort_order: parse_sort_order(&form)?,
    };

    let treatment = TreatmentService::new(&state).update(id, input).await?;
    Ok(Json(treatment))
}

pub async fn delete_treatment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    TreatmentService::new(&state).delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Treatment deleted" })))
}
