use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub clinic_id: Uuid,
    pub doctor_name: String,
    pub appointment_date: NaiveDate,
    pub time_slot: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// The three states a booking moves through. Rows store the lowercase label;
/// parsing is the single validation point for status input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(AppointmentError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub time_slot: String,
    pub patient_name: String,
    pub patient_phone: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListParams {
    pub status: Option<String>,
    pub doctor_id: Option<Uuid>,
}

/// Booking response: the stored row plus whether the confirmation SMS went
/// out. The insert is authoritative either way.
#[derive(Debug, Serialize)]
pub struct BookAppointmentResponse {
    #[serde(flatten)]
    pub appointment: Appointment,
    #[serde(rename = "smsStatus")]
    pub sms_status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BookedSlotsResponse {
    #[serde(rename = "bookedSlots")]
    pub booked_slots: Vec<String>,
}

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Appointment not found")]
    NotFound,

    #[error("Time slot already booked")]
    SlotTaken,

    #[error("Invalid appointment status {0:?}")]
    InvalidStatus(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::DoctorNotFound | AppointmentError::NotFound => {
                AppError::NotFound(err.to_string())
            }
            AppointmentError::SlotTaken => AppError::Conflict(err.to_string()),
            AppointmentError::InvalidStatus(_) => AppError::BadRequest(err.to_string()),
            AppointmentError::Database(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn status_round_trips_through_its_label() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        assert_matches!(
            "rescheduled".parse::<AppointmentStatus>(),
            Err(AppointmentError::InvalidStatus(s)) if s == "rescheduled"
        );
        assert_matches!("".parse::<AppointmentStatus>(), Err(_));
        // Labels are stored lowercase; parsing is case-sensitive.
        assert_matches!("Confirmed".parse::<AppointmentStatus>(), Err(_));
    }
}
