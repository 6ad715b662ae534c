use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Leader {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub picture_url: String,
    pub picture_public_id: String,
    pub bio: Option<String>,
    pub order_index: i64,
    pub created_date: NaiveDateTime,
}

#[derive(Debug, Clone, Validate)]
pub struct NewLeader {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    pub bio: Option<String>,
    pub order_index: i64,
}
