use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: Uuid,
    pub name: String,
    pub comment: String,
    pub rating: Option<i32>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_id: Option<String>,
    pub long_description: Option<String>,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Price {
    pub id: Uuid,
    pub category: String,
    pub name: String,
    pub amount: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineItem {
    pub id: Uuid,
    pub year: String,
    pub title: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub name: String,
    pub comment: String,
    pub rating: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFeedback {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateVideo {
    pub title: String,
    pub description: Option<String>,
    pub video_id: Option<String>,
    pub long_description: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_id: Option<String>,
    pub long_description: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePartner {
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePartner {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrice {
    pub category: String,
    pub name: String,
    pub amount: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrice {
    pub category: Option<String>,
    pub name: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimelineItem {
    pub year: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimelineItem {
    pub year: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub sort_order: Option<i32>,
}
