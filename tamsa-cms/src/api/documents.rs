use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::form::MultipartForm;
use super::{ActionOutcome, Created};
use crate::error::Result;
use crate::middleware::CurrentAdmin;
use crate::models::{Author, Document, NewDocument};
use crate::services::{DocumentStore, RecordStore};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/documents", get(list_documents).post(upload_document))
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
}

async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let store = DocumentStore::new(state.db.clone(), state.media.clone());
    let documents = store.list().await?;

    Ok(Json(DocumentListResponse { documents }))
}

async fn upload_document(
    State(state): State<AppState>,
    admin: Option<CurrentAdmin>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Created<Document>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let draft = NewDocument {
        title: form.text("title"),
        category: form.text("category"),
        uploader: if admin.is_some() { Author::Admin } else { Author::User },
    };

    let store = DocumentStore::new(state.db.clone(), state.media.clone());
    let document = store.create(draft, form.take_file("file")).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new("Document uploaded successfully!", document)),
    ))
}

pub(super) async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActionOutcome>> {
    let store = DocumentStore::new(state.db.clone(), state.media.clone());
    store.delete(id).await?;

    Ok(Json(ActionOutcome::ok("Document deleted successfully!")))
}
