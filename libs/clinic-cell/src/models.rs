use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub clinic_id: Uuid,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateClinic {
    pub name: String,
    pub phone: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClinic {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateDoctor {
    pub name: String,
    pub clinic_id: Uuid,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub clinic_id: Option<Uuid>,
    pub image: Option<String>,
}

/// Equality filter for doctor listings.
#[derive(Debug, Deserialize)]
pub struct DoctorListParams {
    pub clinic_id: Option<Uuid>,
}
