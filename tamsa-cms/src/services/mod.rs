mod activity_store;
mod auth_service;
mod delete_coordinator;
mod document_store;
mod feed_service;
mod leader_store;
mod opportunity_store;

pub use activity_store::*;
pub use auth_service::*;
pub use delete_coordinator::*;
pub use document_store::*;
pub use feed_service::*;
pub use leader_store::*;
pub use opportunity_store::*;

use async_trait::async_trait;
use validator::ValidationErrors;

use crate::error::{AppError, Result};
use crate::media::MediaUpload;

/// Capability set shared by the four record stores.
///
/// `create` validates the draft and the optional upload before anything is
/// sent to the media service. `list` is newest first. `delete` goes through
/// the [`DeleteCoordinator`] for the store's category.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Send;
    type Draft: Send;

    async fn create(&self, draft: Self::Draft, media: Option<MediaUpload>) -> Result<Self::Record>;

    async fn list(&self) -> Result<Vec<Self::Record>>;

    async fn delete(&self, id: i64) -> Result<()>;
}

pub(crate) fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::BadRequest(errors.to_string())
}

/// Sortable UTC timestamp for `created_date` / `upload_date` columns.
pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
