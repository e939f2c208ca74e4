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

use crate::models::{CreateBranch, UpdateBranch};
use crate::services::branch::{merge_gallery, BranchService};

fn parse_gallery_text(form: &UploadForm) -> Result<Option<Vec<String>>, AppError> {
    match form.text("gallery") {
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| AppError::ValidationError(format!("Invalid gallery JSON: {e}"))),
        None => Ok(None),
    }
}

fn parse_coordinate(form: &UploadForm, name: &str) -> Result<Option<f64>, AppError> {
    match form.text(name) {
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::ValidationError(format!("Invalid {name}"))),
        None => Ok(None),
    }
}

pub async fn list_branches(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let branches = BranchService::new(&state).list().await?;
    Ok(Json(branches))
}

pub async fn create_branch(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let mut gallery = parse_gallery_text(&form)?.unwrap_or_default();
    gallery.extend(form.file_list("gallery").iter().cloned());

    let input = CreateBranch {
        name: form.require("name")?.to_string(),
        image: form.image_or_existing("image"),
        address: form.text("address").map(str::to_string),
        phone: form.text("phone").map(str::to_string),
        email: form.text("email").map(str::to_string),
        gallery,
        latitude: parse_coordinate(&form, "latitude")?,
        longitude: parse_coordinate(&form, "longitude")?,
    };

    let branch = BranchService::new(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn update_branch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let service = BranchService::new(&state);

    let current = service.get(id).await?;
    let gallery = merge_gallery(
        &current.gallery.0,
        parse_gallery_text(&form)?,
        form.file_list("gallery"),
    );

    let input = UpdateBranch {
        name: form.text("name").map(str::to_string),
        image: form.image_or_existing("image"),
        address: form.text("address").map(str::to_string),
        phone: form.text("phone").map(str::to_string),
        email: form.text("email").map(str::to_string),
        gallery,
        latitude: parse_coordinate(&form, "latitude")?,
        longitude: parse_coordinate(&form, "longitude")?,
    };

    let branch = service.update(id, input).await?;
    Ok(Json(branch))
}

pub async fn delete_branch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    BranchService::new(&state).delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Branch deleted" })))
}
