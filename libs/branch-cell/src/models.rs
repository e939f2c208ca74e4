use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gallery: Json<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateBranch {
    pub name: String,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gallery: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBranch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// New gallery state, already merged by the handler; `None` keeps the
    /// stored gallery as-is.
    pub gallery: Option<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
