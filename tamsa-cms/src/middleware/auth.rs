use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::AuthService;
use crate::AppState;

pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

/// Request-scoped admin context, present only for a valid session.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub logged_in_at: usize,
}

/// Session token from the `admin_session` cookie, falling back to a bearer header.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentAdmin, AppError> {
    let token = session_token(headers).ok_or(AppError::Unauthorized)?;
    AuthService::new(state.config.admin.clone()).verify_session_token(&token)
}

/// Rejects the request with 401 before any handler work unless an admin session is present.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_admin = authenticate(&state, request.headers())?;

    request.extensions_mut().insert(current_admin);

    Ok(next.run(request).await)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(current_admin) = parts.extensions.get::<CurrentAdmin>() {
            return Ok(current_admin.clone());
        }

        authenticate(state, &parts.headers)
    }
}
