use axum::extract::Multipart;
use std::collections::HashMap;

use shared_models::AppError;

use crate::store::MediaStore;

/// Parsed multipart form: plain text fields plus any uploaded files, already
/// validated and persisted through the [`MediaStore`]. A multipart field
/// carrying a filename is treated as an upload; any other field is text, so
/// the same field name can hold either a new file or a passed-through stored
/// path on update.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<String>>,
}

impl UploadForm {
    pub async fn parse(mut multipart: Multipart, media: &MediaStore) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field
                .name()
                .ok_or_else(|| AppError::BadRequest("Unnamed multipart field".to_string()))?
                .to_string();

            match field.file_name().map(str::to_string) {
                Some(filename) if !filename.is_empty() => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;

                    let stored = media.store(&filename, &content_type, &bytes).await?;
                    form.files.entry(name).or_default().push(stored);
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::ValidationError(format!("Missing required field {:?}", name)))
    }

    /// First stored path uploaded under the given field name.
    pub fn file(&self, name: &str) -> Option<&str> {
        self.files.get(name).and_then(|f| f.first()).map(String::as_str)
    }

    /// All stored paths uploaded under the given field name (gallery fields).
    pub fn file_list(&self, name: &str) -> &[String] {
        self.files.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Image for create/update: a freshly uploaded file wins, otherwise the
    /// stored path passed through in the request body is preserved.
    pub fn image_or_existing(&self, name: &str) -> Option<String> {
        self.file(name)
            .or_else(|| self.text(name))
            .map(str::to_string)
    }
}
