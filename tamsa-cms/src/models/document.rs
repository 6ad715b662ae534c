use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use super::Author;

/// Uploaded PDF, stored as a raw object in the media service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub filename: String,
    pub cloudinary_url: String,
    pub cloudinary_public_id: String,
    pub uploader: String,
    pub upload_date: NaiveDateTime,
}

#[derive(Debug, Clone, Validate)]
pub struct NewDocument {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub uploader: Author,
}
