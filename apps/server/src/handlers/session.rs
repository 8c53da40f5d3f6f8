//! Session endpoints: login, logout, current user.
//!
//! Login delegates credential verification to the authentication service
//! and, on success, populates the session store (memory + durable file).
//! Failure is always the same generic message.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use elegante_core::SessionUser;

use crate::auth;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: SessionUser,
}

/// POST /api/session/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match auth::verify_login(&state.db, &req.username, &req.password).await? {
        Some(user) => {
            let session_user = SessionUser::from(&user);
            state.session.set(session_user.clone()).await;
            Ok(Json(LoginResponse {
                success: true,
                user: session_user,
            }))
        }
        // Unknown username and wrong password are the same failure.
        None => Err(ApiError::invalid_credentials()),
    }
}

/// POST /api/session/logout
///
/// Clears in-memory and durable state unconditionally; logging out while
/// signed out is still a success.
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session.clear().await;
    StatusCode::NO_CONTENT
}

/// GET /api/session
pub async fn current(State(state): State<AppState>) -> Json<Option<SessionUser>> {
    Json(state.session.current().await)
}
