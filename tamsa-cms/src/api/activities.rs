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
use crate::models::{Activity, Author, NewActivity};
use crate::services::{ActivityStore, RecordStore};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/activities", get(list_activities).post(create_activity))
}

#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    pub activities: Vec<Activity>,
}

async fn list_activities(State(state): State<AppState>) -> Result<Json<ActivityListResponse>> {
    let store = ActivityStore::new(state.db.clone(), state.media.clone());
    let activities = store.list().await?;

    Ok(Json(ActivityListResponse { activities }))
}

async fn create_activity(
    State(state): State<AppState>,
    admin: Option<CurrentAdmin>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Created<Activity>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let draft = NewActivity {
        title: form.text("title"),
        description: form.text("description"),
        date: form.text("date"),
        location: form.text("location"),
        author: if admin.is_some() { Author::Admin } else { Author::User },
    };

    let store = ActivityStore::new(state.db.clone(), state.media.clone());
    let activity = store.create(draft, form.take_file("media_file")).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new("Activity posted successfully", activity)),
    ))
}

pub(super) async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ActionOutcome>> {
    let store = ActivityStore::new(state.db.clone(), state.media.clone());
    store.delete(id).await?;

    Ok(Json(ActionOutcome::ok("Activity deleted successfully")))
}
