use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Treatment {
    pub id: Uuid,
    pub title: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub content: Option<sqlx::types::Json<serde_json::Value>>,
    pub image: Option<String>,
    pub slug: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateTreatment {
    pub title: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub content: Option<serde_json::Value>,
    pub image: Option<String>,
    pub slug: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTreatment {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub content: Option<serde_json::Value>,
    pub image: Option<String>,
    pub slug: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}
