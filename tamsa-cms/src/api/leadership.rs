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
use crate::models::{Leader, NewLeader};
use crate::services::{LeaderStore, RecordStore};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leadership", get(list_leaders).post(create_leader))
        .route("/leadership/roster", get(leader_roster))
}

#[derive(Debug, Serialize)]
pub struct LeaderListResponse {
    pub leaders: Vec<Leader>,
}

async fn list_leaders(State(state): State<AppState>) -> Result<Json<LeaderListResponse>> {
    let store = LeaderStore::new(state.db.clone(), state.media.clone());
    let leaders = store.list().await?;

    Ok(Json(LeaderListResponse { leaders }))
}

async fn leader_roster(State(state): State<AppState>) -> Result<Json<LeaderListResponse>> {
    let store = LeaderStore::new(state.db.clone(), state.media.clone());
    let leaders = store.roster().await?;

    Ok(Json(LeaderListResponse { leaders }))
}

async fn create_leader(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Created<Leader>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let order_index = form
        .optional("order_index")
        .map(|v| v.parse::<i64>())
        .transpose()
        .map_err(|_| AppError::BadRequest("Order index must be a whole number".to_string()))?
        .unwrap_or(0);

    let draft = NewLeader {
        name: form.text("name"),
        position: form.text("position"),
        bio: form.optional("bio"),
        order_index,
    };

    let store = LeaderStore::new(state.db.clone(), state.media.clone());
    let leader = store.create(draft, form.take_file("picture")).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new("Leader added successfully", leader)),
    ))
}

pub(super) async fn delete_leader(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActionOutcome>> {
    let store = LeaderStore::new(state.db.clone(), state.media.clone());
    store.delete(id).await?;

    Ok(Json(ActionOutcome::ok("Leader deleted successfully")))
}
