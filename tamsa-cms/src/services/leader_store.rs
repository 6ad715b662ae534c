use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::{now, validation_error, DeleteCoordinator, RecordStore};
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::media::{reclaim_orphan, MediaKind, MediaStore, MediaUpload};
use crate::models::{Category, Leader, NewLeader};

pub const LEADERS_FOLDER: &str = "tamsa/leaders";

pub struct LeaderStore {
    db: Database,
    media: Arc<dyn MediaStore>,
}

impl LeaderStore {
    pub fn new(db: Database, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    /// Leaders in display order for the public leadership page.
    pub async fn roster(&self) -> Result<Vec<Leader>> {
        let leaders = sqlx::query_as::<_, Leader>(
            "SELECT * FROM leaders ORDER BY order_index ASC, created_date DESC, id DESC",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(leaders)
    }
}

#[async_trait]
impl RecordStore for LeaderStore {
    type Record = Leader;
    type Draft = NewLeader;

    async fn create(&self, draft: NewLeader, media: Option<MediaUpload>) -> Result<Leader> {
        draft.validate().map_err(validation_error)?;

        let picture = media.ok_or_else(|| AppError::BadRequest("Please select a picture".to_string()))?;
        if MediaKind::from_content_type(&picture.content_type) != Some(MediaKind::Image) {
            return Err(AppError::BadRequest(
                "Please upload only image files (JPEG, PNG, GIF, WebP)".to_string(),
            ));
        }

        let stored = self.media.upload(&picture, MediaKind::Image, LEADERS_FOLDER).await?;

        let inserted = sqlx::query_as::<_, Leader>(
            r#"
            INSERT INTO leaders (name, position, picture_url, picture_public_id, bio, order_index, created_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.position)
        .bind(&stored.url)
        .bind(&stored.remote_id)
        .bind(&draft.bio)
        .bind(draft.order_index)
        .bind(now())
        .fetch_one(&self.db.pool)
        .await;

        match inserted {
            Ok(leader) => {
                tracing::info!(leader_id = leader.id, name = %leader.name, "Leader added");
                Ok(leader)
            }
            Err(e) => {
                reclaim_orphan(self.media.as_ref(), &stored, MediaKind::Image).await;
                Err(e.into())
            }
        }
    }

    async fn list(&self) -> Result<Vec<Leader>> {
        let leaders = sqlx::query_as::<_, Leader>(
            "SELECT * FROM leaders ORDER BY created_date DESC, id DESC",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(leaders)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        DeleteCoordinator::new(self.db.clone(), self.media.clone())
            .delete(Category::Leadership, id)
            .await
    }
}
