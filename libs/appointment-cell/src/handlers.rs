use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use shared_models::AppError;
use shared_state::AppState;

use crate::models::{
    AppointmentListParams, BookAppointmentRequest, BookedSlotsResponse, UpdateStatusRequest,
};
use crate::services::booking::BookingService;

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AppointmentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = BookingService::new(&state).list(params).await?;
    Ok(Json(appointments))
}

pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = BookingService::new(&state).book(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn booked_slots(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<impl IntoResponse, AppError> {
    let booked_slots = BookingService::new(&state).booked_slots(doctor_id, date).await?;
    Ok(Json(BookedSlotsResponse { booked_slots }))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = BookingService::new(&state)
        .update_status(id, &request.status)
        .await?;
    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    BookingService::new(&state).delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Appointment deleted" })))
}
