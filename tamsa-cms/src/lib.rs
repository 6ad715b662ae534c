//! Content backend for the TAMSA student organization website.
//!
//! Leadership bios, opportunity/announcement listings, activity posts and
//! PDF documents are stored in SQLite; their media lives in a hosted media
//! service. Admins get a combined feed of every post and a delete that
//! reclaims remote media together with the row.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::Database;
use crate::media::MediaStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub media: Arc<dyn MediaStore>,
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health_check))
        .merge(api::routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
