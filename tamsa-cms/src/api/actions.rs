use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::ActionOutcome;
use crate::error::Result;
use crate::models::{Category, FeedEntry};
use crate::services::{DeleteCoordinator, FeedService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/actions", get(list_actions))
        .route("/actions/delete/:category/:id", post(delete_post))
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<FeedEntry>,
}

async fn list_actions(State(state): State<AppState>) -> Result<Json<FeedResponse>> {
    let feed_service = FeedService::new(state.db.clone(), state.media.clone());
    let posts = feed_service.combined().await?;

    Ok(Json(FeedResponse { posts }))
}

async fn delete_post(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i64)>,
) -> Result<Json<ActionOutcome>> {
    let category: Category = category.parse()?;

    let coordinator = DeleteCoordinator::new(state.db.clone(), state.media.clone());
    coordinator.delete(category, id).await?;

    Ok(Json(ActionOutcome::ok(format!("{} post deleted successfully", category))))
}
