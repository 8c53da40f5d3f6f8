//! Users page: listing and creation. Super admin only.
//!
//! The listing never exposes password hashes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::{Page, Role, User};

use crate::auth;
use crate::error::ApiError;
use crate::routes::require_page;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        UserDto {
            id: u.id,
            username: u.username,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, ApiError> {
    require_page(&state, Page::Users).await?;

    let users = state.db.users().list().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    require_page(&state, Page::Users).await?;

    let user = auth::create_user(&state.db, &req.username, &req.password, req.role).await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}
