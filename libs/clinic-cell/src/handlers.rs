use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use shared_media::UploadForm;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{CreateClinic, CreateDoctor, DoctorListParams, UpdateClinic, UpdateDoctor};
use crate::services::{clinic::ClinicService, doctor::DoctorService};

pub async fn list_clinics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let clinics = ClinicService::new(&state).list().await?;
    Ok(Json(clinics))
}

pub async fn create_clinic(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let input = CreateClinic {
        name: form.require("name")?.to_string(),
        phone: form.text("phone").map(str::to_string),
        image: form.image_or_existing("image"),
    };

    let clinic = ClinicService::new(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(clinic)))
}

pub async fn update_clinic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let input = UpdateClinic {
        name: form.text("name").map(str::to_string),
        phone: form.text("phone").map(str::to_string),
        image: form.image_or_existing("image"),
    };

    let clinic = ClinicService::new(&state).update(id, input).await?;
    Ok(Json(clinic))
}

pub async fn delete_clinic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ClinicService::new(&state).delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Clinic deleted" })))
}

pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DoctorListParams>,
) -> Result<impl IntoResponse, AppError> {
    let doctors = DoctorService::new(&state).list(params.clinic_id).await?;
    Ok(Json(doctors))
}

pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let clinic_id: Uuid = form
        .require("clinic_id")?
        .parse()
        .map_err(|_| AppError::ValidationError("Invalid clinic_id".to_string()))?;

    let input = CreateDoctor {
        name: form.require("name")?.to_string(),
        clinic_id,
        image: form.image_or_existing("image"),
    };

    let doctor = DoctorService::new(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(doctor)))
}

pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;

    let clinic_id = match form.text("clinic_id") {
        Some(raw) => Some(
            raw.parse::<Uuid>()
                .map_err(|_| AppError::ValidationError("Invalid clinic_id".to_string()))?,
        ),
        None => None,
    };

    let input = UpdateDoctor {
        name: form.text("name").map(str::to_string),
        clinic_id,
        image: form.image_or_existing("image"),
    };

    let doctor = DoctorService::new(&state).update(id, input).await?;
    Ok(Json(doctor))
}

pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    DoctorService::new(&state).delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Doctor deleted" })))
}
