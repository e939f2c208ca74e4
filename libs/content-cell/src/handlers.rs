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

use crate::models::{
    CreateFaq, CreateFeedback, CreatePartner, CreatePrice, CreateTimelineItem, CreateVideo,
    UpdateFaq, UpdateFeedback, UpdatePartner, UpdatePrice, UpdateTimelineItem, UpdateVideo,
};
use crate::services::{catalog::CatalogService, showcase::ShowcaseService};

fn parse_rating(form: &UploadForm) -> Result<Option<i32>, AppError> {
    match form.text("rating") {
        Some(raw) => {
            let rating = raw
                .parse::<i32>()
                .map_err(|_| AppError::ValidationError("Invalid rating".to_string()))?;
            if !(1..=5).contains(&rating) {
                return Err(AppError::ValidationError(
                    "Rating must be between 1 and 5".to_string(),
                ));
            }
            Ok(Some(rating))
        }
        None => Ok(None),
    }
}

pub async fn list_feedbacks(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(ShowcaseService::new(&state).list_feedbacks().await?))
}

pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let input = CreateFeedback {
        name: form.require("name")?.to_string(),
        comment: form.require("comment")?.to_string(),
        rating: parse_rating(&form)?,
        image: form.image_or_existing("image"),
    };
    let feedback = ShowcaseService::new(&state).create_feedback(input).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

pub async fn update_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let input = UpdateFeedback {
        name: form.text("name").map(str::to_string),
        comment: form.text("comment").map(str::to_string),
        rating: parse_rating(&form)?,
        image: form.image_or_existing("image"),
    };
    Ok(Json(ShowcaseService::new(&state).update_feedback(id, input).await?))
}

pub async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ShowcaseService::new(&state).delete_feedback(id).await?;
    Ok(Json(serde_json::json!({ "message": "Feedback deleted" })))
}

pub async fn list_videos(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(ShowcaseService::new(&state).list_videos().await?))
}

pub async fn create_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let input = CreateVideo {
        title: form.require("title")?.to_string(),
        description: form.text("description").map(str::to_string),
        video_id: form.text("video_id").map(str::to_string),
        long_description: form.text("long_description").map(str::to_string),
        thumbnail: form.image_or_existing("thumbnail"),
    };
    let video = ShowcaseService::new(&state).create_video(input).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn update_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let input = UpdateVideo {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        video_id: form.text("video_id").map(str::to_string),
        long_description: form.text("long_description").map(str::to_string),
        thumbnail: form.image_or_existing("thumbnail"),
    };
    Ok(Json(ShowcaseService::new(&state).update_video(id, input).await?))
}

pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ShowcaseService::new(&state).delete_video(id).await?;
    Ok(Json(serde_json::json!({ "message": "Video deleted" })))
}

pub async fn list_partners(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(ShowcaseService::new(&state).list_partners().await?))
}

pub async fn create_partner(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let input = CreatePartner {
        name: form.require("name")?.to_string(),
        logo: form.image_or_existing("logo"),
        website: form.text("website").map(str::to_string),
    };
    let partner = ShowcaseService::new(&state).create_partner(input).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

pub async fn update_partner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = UploadForm::parse(multipart, &state.media).await?;
    let input = UpdatePartner {
        name: form.text("name").map(str::to_string),
        logo: form.image_or_existing("logo"),
        website: form.text("website").map(str::to_string),
    };
    Ok(Json(ShowcaseService::new(&state).update_partner(id, input).await?))
}

pub async fn delete_partner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ShowcaseService::new(&state).delete_partner(id).await?;
    Ok(Json(serde_json::json!({ "message": "Partner deleted" })))
}

pub async fn list_prices(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CatalogService::new(&state).list_prices().await?))
}

pub async fn create_price(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreatePrice>,
) -> Result<impl IntoResponse, AppError> {
    let price = CatalogService::new(&state).create_price(input).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

pub async fn update_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePrice>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CatalogService::new(&state).update_price(id, input).await?))
}

pub async fn delete_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    CatalogService::new(&state).delete_price(id).await?;
    Ok(Json(serde_json::json!({ "message": "Price deleted" })))
}

pub async fn list_timeline(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CatalogService::new(&state).list_timeline().await?))
}

pub async fn create_timeline_item(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateTimelineItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = CatalogService::new(&state).create_timeline_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_timeline_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTimelineItem>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CatalogService::new(&state).update_timeline_item(id, input).await?))
}

pub async fn delete_timeline_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    CatalogService::new(&state).delete_timeline_item(id).await?;
    Ok(Json(serde_json::json!({ "message": "Timeline item deleted" })))
}

pub async fn list_faqs(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CatalogService::new(&state).list_faqs().await?))
}

pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateFaq>,
) -> Result<impl IntoResponse, AppError> {
    let faq = CatalogService::new(&state).create_faq(input).await?;
    Ok((StatusCode::CREATED, Json(faq)))
}

pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateFaq>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(CatalogService::new(&state).update_faq(id, input).await?))
}

pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    CatalogService::new(&state).delete_faq(id).await?;
    Ok(Json(serde_json::json!({ "message": "FAQ deleted" })))
}
