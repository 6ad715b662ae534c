use axum::{extract::State, routing::post, Form, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;

use super::ActionOutcome;
use crate::error::{AppError, Result};
use crate::middleware::SESSION_COOKIE;
use crate::services::AuthService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<(CookieJar, Json<ActionOutcome>)> {
    payload.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let auth_service = AuthService::new(state.config.admin.clone());
    let token = auth_service.authenticate(&payload.password)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(ActionOutcome::ok("Logged in successfully"))))
}

async fn logout(jar: CookieJar) -> (CookieJar, Json<ActionOutcome>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(ActionOutcome::ok("Logged out successfully")))
}
