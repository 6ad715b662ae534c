use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::form::MultipartForm;
use super::{ActionOutcome, Created};
use crate::error::{AppError, Result};
use crate::middleware::CurrentAdmin;
use crate::models::{Author, NewOpportunity, Opportunity, OpportunityKind};
use crate::services::{OpportunityStore, RecordStore};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/opportunities", get(list_opportunities).post(create_opportunity))
}

#[derive(Debug, Serialize)]
pub struct OpportunityListResponse {
    pub opportunities: Vec<Opportunity>,
}

async fn list_opportunities(State(state): State<AppState>) -> Result<Json<OpportunityListResponse>> {
    let store = OpportunityStore::new(state.db.clone(), state.media.clone());
    let opportunities = store.list().await?;

    Ok(Json(OpportunityListResponse { opportunities }))
}

async fn create_opportunity(
    State(state): State<AppState>,
    admin: Option<CurrentAdmin>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Created<Opportunity>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let kind: OpportunityKind = form
        .optional("type")
        .ok_or_else(|| AppError::BadRequest("Please fill in all required fields".to_string()))?
        .parse()?;

    let draft = NewOpportunity {
        title: form.text("title"),
        description: form.text("description"),
        kind,
        deadline: form.optional("deadline"),
        event_date: form.optional("event_date"),
        location: form.optional("location"),
        author: if admin.is_some() { Author::Admin } else { Author::User },
    };

    let store = OpportunityStore::new(state.db.clone(), state.media.clone());
    let opportunity = store.create(draft, form.take_file("media_file")).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new("Posted successfully", opportunity)),
    ))
}

pub(super) async fn delete_opportunity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActionOutcome>> {
    let store = OpportunityStore::new(state.db.clone(), state.media.clone());
    store.delete(id).await?;

    Ok(Json(ActionOutcome::ok("Item deleted successfully")))
}
