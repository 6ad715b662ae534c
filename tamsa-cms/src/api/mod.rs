mod actions;
mod activities;
mod auth;
mod documents;
mod form;
mod leadership;
mod opportunities;

use axum::{middleware, routing::post, Router};
use serde::Serialize;

use crate::middleware::require_admin;
use crate::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .merge(actions::routes())
        .route("/leadership/delete/:id", post(leadership::delete_leader))
        .route("/opportunities/delete/:id", post(opportunities::delete_opportunity))
        .route("/activities/delete/:id", post(activities::delete_activity))
        .route("/documents/delete/:id", post(documents::delete_document))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .nest("/admin", auth::routes())
        .merge(leadership::routes())
        .merge(opportunities::routes())
        .merge(activities::routes())
        .merge(documents::routes())
        .merge(admin)
}

/// Body of every mutating endpoint's success response.
#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Created<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub record: T,
}

impl<T: Serialize> Created<T> {
    pub fn new(message: impl Into<String>, record: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            record,
        }
    }
}
