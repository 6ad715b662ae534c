// Feed service - the combined admin actions feed across all four stores
use std::sync::Arc;

use super::{ActivityStore, DocumentStore, LeaderStore, OpportunityStore, RecordStore};
use crate::db::Database;
use crate::error::Result;
use crate::media::MediaStore;
use crate::models::FeedEntry;

pub struct FeedService {
    db: Database,
    media: Arc<dyn MediaStore>,
}

impl FeedService {
    pub fn new(db: Database, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    /// Every post from every store, newest first.
    ///
    /// Entries with equal dates keep store order: leaders, opportunities,
    /// activities, documents.
    pub async fn combined(&self) -> Result<Vec<FeedEntry>> {
        let leaders = LeaderStore::new(self.db.clone(), self.media.clone()).list().await?;
        let opportunities = OpportunityStore::new(self.db.clone(), self.media.clone()).list().await?;
        let activities = ActivityStore::new(self.db.clone(), self.media.clone()).list().await?;
        let documents = DocumentStore::new(self.db.clone(), self.media.clone()).list().await?;

        let mut entries: Vec<FeedEntry> = leaders
            .iter()
            .map(FeedEntry::from)
            .chain(opportunities.iter().map(FeedEntry::from))
            .chain(activities.iter().map(FeedEntry::from))
            .chain(documents.iter().map(FeedEntry::from))
            .collect();

        entries.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(count = entries.len(), "Built actions feed");
        Ok(entries)
    }
}
