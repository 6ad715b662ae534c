// Multipart form decoding shared by the create endpoints
use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{AppError, Result};
use crate::media::MediaUpload;

/// Text fields and files of a submitted `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed form data: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let filename = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{}': {}", name, e)))?;

            match filename {
                // Browsers send an empty file part when nothing was chosen
                Some(filename) if filename.is_empty() => {}
                Some(filename) => {
                    form.files
                        .insert(name, MediaUpload::new(filename, content_type, data));
                }
                None => {
                    let value = String::from_utf8(data.to_vec())
                        .map_err(|_| AppError::BadRequest(format!("Field '{}' is not valid UTF-8", name)))?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed value, or an empty string when the field is absent.
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn optional(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|v| !v.is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<MediaUpload> {
        self.files.remove(name)
    }
}
