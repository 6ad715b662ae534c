use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::{now, validation_error, DeleteCoordinator, RecordStore};
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::media::{reclaim_orphan, MediaKind, MediaStore, MediaUpload, PDF_CONTENT_TYPE};
use crate::models::{Category, Document, NewDocument};

pub const DOCUMENTS_FOLDER: &str = "tamsa/documents";

pub struct DocumentStore {
    db: Database,
    media: Arc<dyn MediaStore>,
}

impl DocumentStore {
    pub fn new(db: Database, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }
}

#[async_trait]
impl RecordStore for DocumentStore {
    type Record = Document;
    type Draft = NewDocument;

    async fn create(&self, draft: NewDocument, media: Option<MediaUpload>) -> Result<Document> {
        draft.validate().map_err(validation_error)?;

        let file = media.ok_or_else(|| AppError::BadRequest("Please choose a PDF file".to_string()))?;
        if file.content_type != PDF_CONTENT_TYPE {
            return Err(AppError::BadRequest("Please upload only PDF files".to_string()));
        }

        let stored = self.media.upload(&file, MediaKind::Raw, DOCUMENTS_FOLDER).await?;

        let inserted = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents
                (title, category, filename, cloudinary_url, cloudinary_public_id, uploader, upload_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.category)
        .bind(&file.filename)
        .bind(&stored.url)
        .bind(&stored.remote_id)
        .bind(draft.uploader.as_str())
        .bind(now())
        .fetch_one(&self.db.pool)
        .await;

        match inserted {
            Ok(document) => {
                tracing::info!(document_id = document.id, filename = %document.filename, "Document uploaded");
                Ok(document)
            }
            Err(e) => {
                reclaim_orphan(self.media.as_ref(), &stored, MediaKind::Raw).await;
                Err(e.into())
            }
        }
    }

    async fn list(&self) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents ORDER BY upload_date DESC, id DESC",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(documents)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        DeleteCoordinator::new(self.db.clone(), self.media.clone())
            .delete(Category::Document, id)
            .await
    }
}
