use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use shared_media::MediaStore;
use shared_models::AppError;
use shared_state::AppState;

use crate::models::{Branch, CreateBranch, UpdateBranch};

const COLUMNS: &str =
    "id, name, image, address, phone, email, gallery, latitude, longitude, created_at";

/// Next gallery state for an update. A replacement list (the `gallery` text
/// field, parsed by the handler) resets the base; freshly uploaded files are
/// appended to it. With neither, `None` keeps the stored gallery untouched.
pub fn merge_gallery(
    current: &[String],
    replacement: Option<Vec<String>>,
    uploaded: &[String],
) -> Option<Vec<String>> {
    if replacement.is_none() && uploaded.is_empty() {
        return None;
    }
    let mut gallery = replacement.unwrap_or_else(|| current.to_vec());
    gallery.extend(uploaded.iter().cloned());
    Some(gallery)
}

#[derive(Debug, FromRow)]
struct OwnedFiles {
    image: Option<String>,
    gallery: Json<Vec<String>>,
}

pub struct BranchService {
    pool: PgPool,
    media: MediaStore,
}

impl BranchService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            media: state.media.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Branch>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM branches ORDER BY created_at");
        let branches = sqlx::query_as::<_, Branch>(&query)
            .fetch_all(&self.pool)
            .await?;
        debug!("Listed {} branches", branches.len());
        Ok(branches)
    }

    pub async fn create(&self, input: CreateBranch) -> Result<Branch, AppError> {
        let query = format!(
            "INSERT INTO branches
                (id, name, image, address, phone, email, gallery, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let branch = sqlx::query_as::<_, Branch>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(Json(input.gallery))
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(&self.pool)
            .await?;

        info!("Branch {} created", branch.id);
        Ok(branch)
    }

    pub async fn update(&self, id: Uuid, input: UpdateBranch) -> Result<Branch, AppError> {
        let current = self.get(id).await?;

        let query = format!(
            "UPDATE branches SET
                name = COALESCE($2, name),
                image = COALESCE($3, image),
                address = COALESCE($4, address),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                gallery = COALESCE($7, gallery),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let branch = sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.gallery.map(Json))
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(&self.pool)
            .await?;

        if let (Some(old), Some(new)) = (&current.image, &branch.image) {
            if old != new {
                self.media.remove(old).await;
            }
        }
        // Gallery entries dropped by a replacement lose their files too.
        let dropped: Vec<String> = current
            .gallery
            .0
            .iter()
            .filter(|path| !branch.gallery.0.contains(path))
            .cloned()
            .collect();
        self.media.remove_all(&dropped).await;

        info!("Branch {} updated", id);
        Ok(branch)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let owned = sqlx::query_as::<_, OwnedFiles>(
            "DELETE FROM branches WHERE id = $1 RETURNING image, gallery",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match owned {
            None => Err(AppError::NotFound("Branch not found".to_string())),
            Some(owned) => {
                if let Some(path) = owned.image {
                    self.media.remove(&path).await;
                }
                self.media.remove_all(&owned.gallery.0).await;
                info!("Branch {} deleted", id);
                Ok(())
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Branch, AppError> {
        let query = format!("SELECT {COLUMNS} FROM branches WHERE id = $1");
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::merge_gallery;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_input_keeps_stored_gallery() {
        assert_eq!(merge_gallery(&paths(&["/uploads/a.jpg"]), None, &[]), None);
    }

    #[test]
    fn uploads_append_to_stored_gallery() {
        let merged = merge_gallery(
            &paths(&["/uploads/a.jpg"]),
            None,
            &paths(&["/uploads/b.jpg"]),
        );
        assert_eq!(merged, Some(paths(&["/uploads/a.jpg", "/uploads/b.jpg"])));
    }

    #[test]
    fn replacement_resets_the_base() {
        let merged = merge_gallery(
            &paths(&["/uploads/a.jpg", "/uploads/b.jpg"]),
            Some(paths(&["/uploads/b.jpg"])),
            &[],
        );
        assert_eq!(merged, Some(paths(&["/uploads/b.jpg"])));
    }

    #[test]
    fn uploads_append_to_the_replacement() {
        let merged = merge_gallery(
            &paths(&["/uploads/a.jpg"]),
            Some(vec![]),
            &paths(&["/uploads/c.jpg"]),
        );
        assert_eq!(merged, Some(paths(&["/uploads/c.jpg"])));
    }
}
