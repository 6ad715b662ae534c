use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use super::Author;
use crate::media::MediaKind;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub media_url: Option<String>,
    pub media_public_id: Option<String>,
    pub media_type: Option<MediaKind>,
    pub author: String,
    pub created_date: NaiveDateTime,
}

#[derive(Debug, Clone, Validate)]
pub struct NewActivity {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub author: Author,
}
