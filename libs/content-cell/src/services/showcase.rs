//! Image-owning site content: patient feedback, videos and partner logos.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use shared_media::MediaStore;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{
    CreateFeedback, CreatePartner, CreateVideo, Feedback, Partner, UpdateFeedback, UpdatePartner,
    UpdateVideo, Video,
};

const FEEDBACK_COLUMNS: &str = "id, name, comment, rating, image, created_at";
const VIDEO_COLUMNS: &str =
    "id, title, description, video_id, long_description, thumbnail, created_at";
const PARTNER_COLUMNS: &str = "id, name, logo, website, created_at";

pub struct ShowcaseService {
    pool: PgPool,
    media: MediaStore,
}

impl ShowcaseService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            media: state.media.clone(),
        }
    }

    async fn delete_with_file(&self, table: &str, file_column: &str, id: Uuid, label: &str) -> Result<(), AppError> {
        let query = format!("DELETE FROM {table} WHERE id = $1 RETURNING {file_column}");
        let file: Option<Option<String>> = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match file {
            None => Err(AppError::NotFound(format!("{label} not found"))),
            Some(file) => {
                if let Some(path) = file {
                    self.media.remove(&path).await;
                }
                info!("{} {} deleted", label, id);
                Ok(())
            }
        }
    }

    async fn drop_replaced(&self, old: &Option<String>, new: &Option<String>) {
        if let (Some(old), Some(new)) = (old, new) {
            if old != new {
                self.media.remove(old).await;
            }
        }
    }

    pub async fn list_feedbacks(&self) -> Result<Vec<Feedback>, AppError> {
        let query = format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks ORDER BY created_at");
        Ok(sqlx::query_as::<_, Feedback>(&query).fetch_all(&self.pool).await?)
    }

    pub async fn create_feedback(&self, input: CreateFeedback) -> Result<Feedback, AppError> {
        let query = format!(
            "INSERT INTO feedbacks (id, name, comment, rating, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {FEEDBACK_COLUMNS}"
        );
        let feedback = sqlx::query_as::<_, Feedback>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.comment)
            .bind(input.rating)
            .bind(&input.image)
            .fetch_one(&self.pool)
            .await?;
        info!("Feedback {} created", feedback.id);
        Ok(feedback)
    }

    pub async fn update_feedback(&self, id: Uuid, input: UpdateFeedback) -> Result<Feedback, AppError> {
        let query = format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE id = $1");
        let current = sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;

        let query = format!(
            "UPDATE feedbacks SET
                name = COALESCE($2, name),
                comment = COALESCE($3, comment),
                rating = COALESCE($4, rating),
                image = COALESCE($5, image)
             WHERE id = $1
             RETURNING {FEEDBACK_COLUMNS}"
        );
        let feedback = sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.comment)
            .bind(input.rating)
            .bind(&input.image)
            .fetch_one(&self.pool)
            .await?;

        self.drop_replaced(&current.image, &feedback.image).await;
        Ok(feedback)
    }

    pub async fn delete_feedback(&self, id: Uuid) -> Result<(), AppError> {
        self.delete_with_file("feedbacks", "image", id, "Feedback").await
    }

    pub async fn list_videos(&self) -> Result<Vec<Video>, AppError> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at");
        Ok(sqlx::query_as::<_, Video>(&query).fetch_all(&self.pool).await?)
    }

    pub async fn create_video(&self, input: CreateVideo) -> Result<Video, AppError> {
        let query = format!(
            "INSERT INTO videos (id, title, description, video_id, long_description, thumbnail)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {VIDEO_COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_id)
            .bind(&input.long_description)
            .bind(&input.thumbnail)
            .fetch_one(&self.pool)
            .await?;
        info!("Video {} created", video.id);
        Ok(video)
    }

    pub async fn update_video(&self, id: Uuid, input: UpdateVideo) -> Result<Video, AppError> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        let current = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                video_id = COALESCE($4, video_id),
                long_description = COALESCE($5, long_description),
                thumbnail = COALESCE($6, thumbnail)
             WHERE id = $1
             RETURNING {VIDEO_COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_id)
            .bind(&input.long_description)
            .bind(&input.thumbnail)
            .fetch_one(&self.pool)
            .await?;

        self.drop_replaced(&current.thumbnail, &video.thumbnail).await;
        Ok(video)
    }

    pub async fn delete_video(&self, id: Uuid) -> Result<(), AppError> {
        self.delete_with_file("videos", "thumbnail", id, "Video").await
    }

    pub async fn list_partners(&self) -> Result<Vec<Partner>, AppError> {
        let query = format!("SELECT {PARTNER_COLUMNS} FROM partners ORDER BY created_at");
        Ok(sqlx::query_as::<_, Partner>(&query).fetch_all(&self.pool).await?)
    }

    pub async fn create_partner(&self, input: CreatePartner) -> Result<Partner, AppError> {
        let query = format!(
            "INSERT INTO partners (id, name, logo, website)
             VALUES ($1, $2, $3, $4)
             RETURNING {PARTNER_COLUMNS}"
        );
        let partner = sqlx::query_as::<_, Partner>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.logo)
            .bind(&input.website)
            .fetch_one(&self.pool)
            .await?;
        info!("Partner {} created", partner.id);
        Ok(partner)
    }

    pub async fn update_partner(&self, id: Uuid, input: UpdatePartner) -> Result<Partner, AppError> {
        let query = format!("SELECT {PARTNER_COLUMNS} FROM partners WHERE id = $1");
        let current = sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?;

        let query = format!(
            "UPDATE partners SET
                name = COALESCE($2, name),
                logo = COALESCE($3, logo),
                website = COALESCE($4, website)
             WHERE id = $1
             RETURNING {PARTNER_COLUMNS}"
        );
        let partner = sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.logo)
            .bind(&input.website)
            .fetch_one(&self.pool)
            .await?;

        self.drop_replaced(&current.logo, &partner.logo).await;
        Ok(partner)
    }

    pub async fn delete_partner(&self, id: Uuid) -> Result<(), AppError> {
        self.delete_with_file("partners", "logo", id, "Partner").await
    }
}
