use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use shared_media::MediaStore;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{Clinic, CreateClinic, UpdateClinic};

const COLUMNS: &str = "id, name, phone, image, created_at";

pub struct ClinicService {
    pool: PgPool,
    media: MediaStore,
}

impl ClinicService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            media: state.media.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Clinic>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM clinics ORDER BY created_at");
        let clinics = sqlx::query_as::<_, Clinic>(&query)
            .fetch_all(&self.pool)
            .await?;
        debug!("Listed {} clinics", clinics.len());
        Ok(clinics)
    }

    pub async fn create(&self, input: CreateClinic) -> Result<Clinic, AppError> {
        let query = format!(
            "INSERT INTO clinics (id, name, phone, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let clinic = sqlx::query_as::<_, Clinic>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.image)
            .fetch_one(&self.pool)
            .await?;

        info!("Clinic {} created", clinic.id);
        Ok(clinic)
    }

    pub async fn update(&self, id: Uuid, input: UpdateClinic) -> Result<Clinic, AppError> {
        let current = self.get(id).await?;

        let query = format!(
            "UPDATE clinics SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                image = COALESCE($4, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let clinic = sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.image)
            .fetch_one(&self.pool)
            .await?;

        // A replaced image loses its backing file, best-effort.
        if let (Some(old), Some(new)) = (&current.image, &clinic.image) {
            if old != new {
                self.media.remove(old).await;
            }
        }

        info!("Clinic {} updated", id);
        Ok(clinic)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // Doctor rows cascade with their clinic; collect their image paths
        // first so the files go with them.
        let doctor_images: Vec<String> = sqlx::query_scalar(
            "SELECT image FROM doctors WHERE clinic_id = $1 AND image IS NOT NULL",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM clinics WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match image {
            None => Err(AppError::NotFound("Clinic not found".to_string())),
            Some(image) => {
                if let Some(path) = image {
                    self.media.remove(&path).await;
                }
                self.media.remove_all(&doctor_images).await;
                info!("Clinic {} deleted", id);
                Ok(())
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Clinic, AppError> {
        let query = format!("SELECT {COLUMNS} FROM clinics WHERE id = $1");
        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Clinic not found".to_string()))
    }
}
