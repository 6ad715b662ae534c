// Delete coordinator - reclaims remote media, then removes the row
use std::sync::Arc;

use sqlx::FromRow;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::media::{MediaKind, MediaStore};
use crate::models::Category;

/// Where a category's rows live and how their media reference is found.
struct DeleteTarget {
    lookup_sql: &'static str,
    delete_sql: &'static str,
    /// `None` derives the kind from the stored `media_type`.
    fixed_kind: Option<MediaKind>,
}

impl DeleteTarget {
    fn for_category(category: Category) -> Self {
        match category {
            Category::Leadership => Self {
                lookup_sql: "SELECT picture_public_id AS remote_id, NULL AS media_type FROM leaders WHERE id = ?1",
                delete_sql: "DELETE FROM leaders WHERE id = ?1",
                fixed_kind: Some(MediaKind::Image),
            },
            Category::Opportunity | Category::Announcement => Self {
                lookup_sql: "SELECT media_public_id AS remote_id, media_type FROM opportunities WHERE id = ?1",
                delete_sql: "DELETE FROM opportunities WHERE id = ?1",
                fixed_kind: None,
            },
            Category::Activity => Self {
                lookup_sql: "SELECT media_public_id AS remote_id, media_type FROM activities WHERE id = ?1",
                delete_sql: "DELETE FROM activities WHERE id = ?1",
                fixed_kind: None,
            },
            Category::Document => Self {
                lookup_sql: "SELECT cloudinary_public_id AS remote_id, NULL AS media_type FROM documents WHERE id = ?1",
                delete_sql: "DELETE FROM documents WHERE id = ?1",
                fixed_kind: Some(MediaKind::Raw),
            },
        }
    }

    fn remote_kind(&self, media_type: Option<&str>) -> MediaKind {
        self.fixed_kind
            .unwrap_or_else(|| MediaKind::from_stored(media_type))
    }
}

#[derive(Debug, FromRow)]
struct MediaRef {
    remote_id: Option<String>,
    media_type: Option<String>,
}

pub struct DeleteCoordinator {
    db: Database,
    media: Arc<dyn MediaStore>,
}

impl DeleteCoordinator {
    pub fn new(db: Database, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    /// Delete a post and reclaim its remote media.
    ///
    /// The remote object is destroyed first and the row is removed only after
    /// that succeeds, so a failed destroy leaves the row in place. No database
    /// lock is held across the remote call. Two concurrent deletes may both
    /// destroy (the media service treats a missing object as success) but only
    /// one removes the row; the other gets `NotFound`.
    pub async fn delete(&self, category: Category, id: i64) -> Result<()> {
        let target = DeleteTarget::for_category(category);
        let not_found = || AppError::NotFound(format!("{} post {} not found", category, id));

        let media_ref: MediaRef = sqlx::query_as(target.lookup_sql)
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await?
            .ok_or_else(not_found)?;

        if let Some(remote_id) = media_ref.remote_id.filter(|r| !r.is_empty()) {
            let kind = target.remote_kind(media_ref.media_type.as_deref());

            if let Err(e) = self.media.destroy(&remote_id, kind).await {
                tracing::warn!(
                    category = %category,
                    id,
                    remote_id = %remote_id,
                    error = %e,
                    "Remote media destroy failed, keeping row"
                );
                return Err(e);
            }
        }

        let deleted = sqlx::query(target.delete_sql)
            .bind(id)
            .execute(&self.db.pool)
            .await?
            .rows_affected();

        // Lost a race with a concurrent delete
        if deleted == 0 {
            return Err(not_found());
        }

        tracing::info!(category = %category, id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_per_category() {
        let leader = DeleteTarget::for_category(Category::Leadership);
        assert_eq!(leader.remote_kind(Some("video")), MediaKind::Image);

        let document = DeleteTarget::for_category(Category::Document);
        assert_eq!(document.remote_kind(None), MediaKind::Raw);

        let activity = DeleteTarget::for_category(Category::Activity);
        assert_eq!(activity.remote_kind(Some("image")), MediaKind::Image);
        assert_eq!(activity.remote_kind(Some("video")), MediaKind::Video);

        let announcement = DeleteTarget::for_category(Category::Announcement);
        assert!(announcement.lookup_sql.contains("FROM opportunities"));
    }
}
