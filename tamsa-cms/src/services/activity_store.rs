use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::{now, validation_error, DeleteCoordinator, RecordStore};
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::media::{reclaim_orphan, MediaKind, MediaStore, MediaUpload};
use crate::models::{Activity, Category, NewActivity};

pub const ACTIVITIES_FOLDER: &str = "tamsa/activities";

pub struct ActivityStore {
    db: Database,
    media: Arc<dyn MediaStore>,
}

impl ActivityStore {
    pub fn new(db: Database, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }
}

#[async_trait]
impl RecordStore for ActivityStore {
    type Record = Activity;
    type Draft = NewActivity;

    async fn create(&self, draft: NewActivity, media: Option<MediaUpload>) -> Result<Activity> {
        draft.validate().map_err(validation_error)?;

        let upload = match media {
            Some(upload) => {
                let kind = MediaKind::from_content_type(&upload.content_type).ok_or_else(|| {
                    AppError::BadRequest("Please upload only image or video files".to_string())
                })?;
                Some((upload, kind))
            }
            None => None,
        };

        let stored = match &upload {
            Some((file, kind)) => Some((self.media.upload(file, *kind, ACTIVITIES_FOLDER).await?, *kind)),
            None => None,
        };

        let inserted = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities
                (title, description, date, location, media_url, media_public_id, media_type, author, created_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.date)
        .bind(&draft.location)
        .bind(stored.as_ref().map(|(s, _)| s.url.as_str()))
        .bind(stored.as_ref().map(|(s, _)| s.remote_id.as_str()))
        .bind(stored.as_ref().map(|(_, kind)| *kind))
        .bind(draft.author.as_str())
        .bind(now())
        .fetch_one(&self.db.pool)
        .await;

        match inserted {
            Ok(activity) => {
                tracing::info!(
                    activity_id = activity.id,
                    media_type = ?activity.media_type,
                    "Activity posted"
                );
                Ok(activity)
            }
            Err(e) => {
                if let Some((stored, kind)) = &stored {
                    reclaim_orphan(self.media.as_ref(), stored, *kind).await;
                }
                Err(e.into())
            }
        }
    }

    async fn list(&self) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities ORDER BY created_date DESC, id DESC",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(activities)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        DeleteCoordinator::new(self.db.clone(), self.media.clone())
            .delete(Category::Activity, id)
            .await
    }
}
