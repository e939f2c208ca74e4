use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use shared_media::MediaStore;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{CreateTreatment, Treatment, UpdateTreatment};

const COLUMNS: &str = "id, title, short_description, long_description, content, image, \
                       slug, seo_title, seo_description, is_featured, sort_order, created_at";

pub struct TreatmentService {
    pool: PgPool,
    media: MediaStore,
}

impl TreatmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            media: state.media.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Treatment>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM treatments ORDER BY sort_order, title");
        let treatments = sqlx::query_as::<_, Treatment>(&query)
            .fetch_all(&self.pool)
            .await?;
        debug!("Listed {} treatments", treatments.len());
        Ok(treatments)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Treatment, AppError> {
        let query = format!("SELECT {COLUMNS} FROM treatments WHERE slug = $1");
        sqlx::query_as::<_, Treatment>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment not found".to_string()))
    }

    pub async fn create(&self, input: CreateTreatment) -> Result<Treatment, AppError> {
        // Slugs address treatments publicly; collisions are a caller mistake,
        // reported before any row is written.
        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM treatments WHERE slug = $1)")
            .bind(&input.slug)
            .fetch_one(&self.pool)
            .await?;
        if taken {
            return Err(AppError::BadRequest(format!(
                "Slug {:?} is already in use",
                input.slug
            )));
        }

        let query = format!(
            "INSERT INTO treatments
                (id, title, short_description, long_description, content, image,
                 slug, seo_title, seo_description, is_featured, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let treatment = sqlx::query_as::<_, Treatment>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.short_description)
            .bind(&input.long_description)
            .bind(input.content.map(Json))
            .bind(&input.image)
            .bind(&input.slug)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_one(&self.pool)
            .await?;

        info!("Treatment {} ({}) created", treatment.id, treatment.slug);
        Ok(treatment)
    }

    pub async fn update(&self, id: Uuid, input: UpdateTreatment) -> Result<Treatment, AppError> {
        let current = self.get(id).await?;

        let query = format!(
            "UPDATE treatments SET
                title = COALESCE($2, title),
                short_description = COALESCE($3, short_description),
                long_description = COALESCE($4, long_description),
                content = COALESCE($5, content),
                image = COALESCE($6, image),
                slug = COALESCE($7, slug),
                seo_title = COALESCE($8, seo_title),
                seo_description = COALESCE($9, seo_description),
                is_featured = COALESCE($10, is_featured),
                sort_order = COALESCE($11, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let treatment = sqlx::query_as::<_, Treatment>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.short_description)
            .bind(&input.long_description)
            .bind(input.content.map(Json))
            .bind(&input.image)
            .bind(&input.slug)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_one(&self.pool)
            .await?;

        if let (Some(old), Some(new)) = (&current.image, &treatment.image) {
            if old != new {
                self.media.remove(old).await;
            }
        }

        info!("Treatment {} updated", id);
        Ok(treatment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM treatments WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match image {
            None => Err(AppError::NotFound("Treatment not found".to_string())),
            Some(image) => {
                if let Some(path) = image {
                    self.media.remove(&path).await;
                }
                info!("Treatment {} deleted", id);
                Ok(())
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Treatment, AppError> {
        let query = format!("SELECT {COLUMNS} FROM treatments WHERE id = $1");
        sqlx::query_as::<_, Treatment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Treatment not found".to_string()))
    }
}
