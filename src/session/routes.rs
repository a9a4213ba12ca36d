//! Session route handlers

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

use super::forms::validate_auth_form;
use super::models::{AuthForm, AuthMode, Session, UserProfile};

/// Response for a started session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub user: UserProfile,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token,
            user: session.user.clone(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/session",
        post(create).get(current).delete(destroy),
    )
}

/// Log in or sign up.
///
/// Credentials are validated for shape only; there is no account backend.
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<AuthForm>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    validate_auth_form(&form, Utc::now().date_naive())?;

    let name = match form.mode {
        AuthMode::Signup => format!("{} {}", form.first_name.trim(), form.last_name.trim()),
        AuthMode::Login => form
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let user = UserProfile {
        id: Uuid::new_v4(),
        name,
        email: form.email.trim().to_string(),
        role: form.user_type,
    };

    let session = state.cache.sessions.login(user).await;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&*session))))
}

/// Current user for the bearer token
pub async fn current(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>> {
    let session = require_session(&state, &headers).await?;
    Ok(Json(SessionResponse::from(&*session)))
}

/// Log out
pub async fn destroy(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    let token = bearer_token(&headers)?;
    state.cache.sessions.logout(&token).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the session named by the `Authorization: Bearer` header.
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Arc<Session>> {
    let token = bearer_token(headers)?;
    state
        .cache
        .sessions
        .current(&token)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired or unknown".to_string()))
}

/// Extract the session token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<Uuid> {
    const BEARER_PREFIX: &str = "Bearer ";

    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AppError::Unauthorized("Authorization header must use Bearer scheme".to_string())
    })?;

    Uuid::parse_str(token.trim())
        .map_err(|_| AppError::Unauthorized("Malformed session token".to_string()))
}
