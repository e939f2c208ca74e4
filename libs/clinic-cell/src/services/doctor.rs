use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use shared_media::MediaStore;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{CreateDoctor, Doctor, UpdateDoctor};

const COLUMNS: &str = "id, name, clinic_id, image, created_at";

pub struct DoctorService {
    pool: PgPool,
    media: MediaStore,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            media: state.media.clone(),
        }
    }

    /// List doctors, optionally restricted to a single clinic.
    pub async fn list(&self, clinic_id: Option<Uuid>) -> Result<Vec<Doctor>, AppError> {
        let doctors = match clinic_id {
            Some(clinic_id) => {
                let query =
                    format!("SELECT {COLUMNS} FROM doctors WHERE clinic_id = $1 ORDER BY created_at");
                sqlx::query_as::<_, Doctor>(&query)
                    .bind(clinic_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM doctors ORDER BY created_at");
                sqlx::query_as::<_, Doctor>(&query).fetch_all(&self.pool).await?
            }
        };
        debug!("Listed {} doctors", doctors.len());
        Ok(doctors)
    }

    pub async fn create(&self, input: CreateDoctor) -> Result<Doctor, AppError> {
        // The owning clinic is a required reference.
        let clinic_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clinics WHERE id = $1)")
                .bind(input.clinic_id)
                .fetch_one(&self.pool)
                .await?;
        if !clinic_exists {
            return Err(AppError::BadRequest("Clinic not found".to_string()));
        }

        let query = format!(
            "INSERT INTO doctors (id, name, clinic_id, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let doctor = sqlx::query_as::<_, Doctor>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(input.clinic_id)
            .bind(&input.image)
            .fetch_one(&self.pool)
            .await?;

        info!("Doctor {} created under clinic {}", doctor.id, doctor.clinic_id);
        Ok(doctor)
    }

    pub async fn update(&self, id: Uuid, input: UpdateDoctor) -> Result<Doctor, AppError> {
        let current = self.get(id).await?;

        let query = format!(
            "UPDATE doctors SET
                name = COALESCE($2, name),
                clinic_id = COALESCE($3, clinic_id),
                image = COALESCE($4, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let doctor = sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.clinic_id)
            .bind(&input.image)
            .fetch_one(&self.pool)
            .await?;

        if let (Some(old), Some(new)) = (&current.image, &doctor.image) {
            if old != new {
                self.media.remove(old).await;
            }
        }

        info!("Doctor {} updated", id);
        Ok(doctor)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("DELETE FROM doctors WHERE id = $1 RETURNING image")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match image {
            None => Err(AppError::NotFound("Doctor not found".to_string())),
            Some(image) => {
                if let Some(path) = image {
                    self.media.remove(&path).await;
                }
                info!("Doctor {} deleted", id);
                Ok(())
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Doctor, AppError> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE id = $1");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))
    }
}
