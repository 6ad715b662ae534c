use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::{now, validation_error, DeleteCoordinator, RecordStore};
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::media::{reclaim_orphan, MediaKind, MediaStore, MediaUpload};
use crate::models::{Category, NewOpportunity, Opportunity};

pub const OPPORTUNITIES_FOLDER: &str = "tamsa/opportunities";

/// Opportunities and announcements; both live in the `opportunities` table.
pub struct OpportunityStore {
    db: Database,
    media: Arc<dyn MediaStore>,
}

impl OpportunityStore {
    pub fn new(db: Database, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }
}

#[async_trait]
impl RecordStore for OpportunityStore {
    type Record = Opportunity;
    type Draft = NewOpportunity;

    async fn create(&self, draft: NewOpportunity, media: Option<MediaUpload>) -> Result<Opportunity> {
        draft.validate().map_err(validation_error)?;
        draft.check_dates()?;

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
            Some((file, kind)) => Some((self.media.upload(file, *kind, OPPORTUNITIES_FOLDER).await?, *kind)),
            None => None,
        };

        let inserted = sqlx::query_as::<_, Opportunity>(
            r#"
            INSERT INTO opportunities
                (title, description, type, deadline, event_date, location,
                 media_url, media_public_id, media_type, author, created_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.kind)
        .bind(&draft.deadline)
        .bind(&draft.event_date)
        .bind(&draft.location)
        .bind(stored.as_ref().map(|(s, _)| s.url.as_str()))
        .bind(stored.as_ref().map(|(s, _)| s.remote_id.as_str()))
        .bind(stored.as_ref().map(|(_, kind)| *kind))
        .bind(draft.author.as_str())
        .bind(now())
        .fetch_one(&self.db.pool)
        .await;

        match inserted {
            Ok(opportunity) => {
                tracing::info!(
                    opportunity_id = opportunity.id,
                    kind = opportunity.kind.as_str(),
                    has_media = opportunity.media_public_id.is_some(),
                    "Listing posted"
                );
                Ok(opportunity)
            }
            Err(e) => {
                if let Some((stored, kind)) = &stored {
                    reclaim_orphan(self.media.as_ref(), stored, *kind).await;
                }
                Err(e.into())
            }
        }
    }

    async fn list(&self) -> Result<Vec<Opportunity>> {
        let opportunities = sqlx::query_as::<_, Opportunity>(
            "SELECT * FROM opportunities ORDER BY created_date DESC, id DESC",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(opportunities)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        DeleteCoordinator::new(self.db.clone(), self.media.clone())
            .delete(Category::Opportunity, id)
            .await
    }
}
