//! # Authentication Service
//!
//! Password verification, user creation, and the idempotent default-admin
//! bootstrap, plus the JSON `{action, ...}` endpoint that fronts them.
//!
//! ## Endpoint Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/auth          Authorization: Bearer <static credential>      │
//! │                                                                         │
//! │  { "action": "login", "username": "...", "password": "..." }           │
//! │      → 200 { "success": true, "user": { id, username, role } }         │
//! │      → 401 { "success": false, "error": "Invalid username or password" }│
//! │                                                                         │
//! │  { "action": "create_user", "username", "password", "role" }           │
//! │      → 200 { "success": true, "user": ... }                            │
//! │      → 400 { "success": false, "error": "<validation message>" }       │
//! │                                                                         │
//! │  { "action": "create_default_admin" }                                  │
//! │      → 200 { "success": true }   (idempotent: checks existence first)  │
//! │                                                                         │
//! │  CORS: any origin, methods POST/OPTIONS.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Login failure is always the same generic message; whether the username
//! or the password was wrong is never revealed.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use elegante_core::validation::{validate_password, validate_username};
use elegante_core::{Role, SessionUser, User, DEFAULT_ADMIN_USERNAME};
use elegante_db::Database;

use crate::error::ApiError;
use crate::password::{hash_password, verify_password};
use crate::AppState;

// =============================================================================
// Service Functions
// =============================================================================

/// Verifies a username/password pair.
///
/// ## Returns
/// * `Ok(Some(user))` - credentials valid
/// * `Ok(None)` - unknown username OR wrong password (indistinguishable)
pub async fn verify_login(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<Option<User>, ApiError> {
    let user = db.users().get_by_username(username.trim()).await?;

    match user {
        Some(user) if verify_password(password, &user.password_hash) => {
            info!(username = %user.username, role = %user.role, "Login verified");
            Ok(Some(user))
        }
        Some(user) => {
            warn!(username = %user.username, "Login failed: password mismatch");
            Ok(None)
        }
        None => {
            warn!(username = %username, "Login failed: unknown username");
            Ok(None)
        }
    }
}

/// Creates a user account with a freshly hashed password.
///
/// ## Returns
/// * `Err(ValidationError)` - bad username/password, or duplicate username
pub async fn create_user(
    db: &Database,
    username: &str,
    password: &str,
    role: Role,
) -> Result<User, ApiError> {
    let username = username.trim();
    validate_username(username)?;
    validate_password(password)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        password_hash: hash_password(password)?,
        role,
        created_at: Utc::now(),
    };

    db.users().insert(&user).await?;
    info!(username = %user.username, role = %user.role, "User created");

    Ok(user)
}

/// Creates the default admin account if absent.
///
/// Idempotent by design (checks existence first); invoked on every
/// application start regardless of whether a session already exists.
///
/// ## Returns
/// * `Ok(true)` - the account was created now
/// * `Ok(false)` - it already existed
pub async fn ensure_default_admin(db: &Database, password: &str) -> Result<bool, ApiError> {
    if db
        .users()
        .get_by_username(DEFAULT_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    create_user(db, DEFAULT_ADMIN_USERNAME, password, Role::SuperAdmin).await?;
    info!(username = DEFAULT_ADMIN_USERNAME, "Default admin created");
    Ok(true)
}

// =============================================================================
// Endpoint
// =============================================================================

/// The `{action, ...fields}` request body.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuthRequest {
    Login { username: String, password: String },
    CreateUser {
        username: String,
        password: String,
        role: Role,
    },
    CreateDefaultAdmin,
}

/// The `{success, user?}` / `{error}` response body.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponse {
    fn ok(user: Option<SessionUser>) -> Self {
        AuthResponse {
            success: true,
            user,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        AuthResponse {
            success: false,
            user: None,
            error: Some(error.into()),
        }
    }
}

/// Extract bearer token from an authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Whether the request carries the configured static bearer credential.
///
/// An empty configured credential denies everything: the service fails
/// closed at request time, not at startup.
fn bearer_authorized(state: &AppState, headers: &HeaderMap) -> bool {
    if state.config.service_token.is_empty() {
        return false;
    }

    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .map(|token| token == state.config.service_token)
        .unwrap_or(false)
}

/// POST /api/auth
pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AuthRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    if !bearer_authorized(&state, &headers) {
        warn!("Auth endpoint called without a valid bearer credential");
        return (
            StatusCode::UNAUTHORIZED,
            Json(AuthResponse::failed("Unauthorized")),
        );
    }

    match req {
        AuthRequest::Login { username, password } => {
            match verify_login(&state.db, &username, &password).await {
                Ok(Some(user)) => (
                    StatusCode::OK,
                    Json(AuthResponse::ok(Some(SessionUser::from(&user)))),
                ),
                Ok(None) => (
                    StatusCode::UNAUTHORIZED,
                    Json(AuthResponse::failed("Invalid username or password")),
                ),
                Err(e) => (e.code.status(), Json(AuthResponse::failed(e.message))),
            }
        }

        AuthRequest::CreateUser {
            username,
            password,
            role,
        } => match create_user(&state.db, &username, &password, role).await {
            Ok(user) => (
                StatusCode::OK,
                Json(AuthResponse::ok(Some(SessionUser::from(&user)))),
            ),
            Err(e) => (e.code.status(), Json(AuthResponse::failed(e.message))),
        },

        AuthRequest::CreateDefaultAdmin => {
            match ensure_default_admin(&state.db, &state.config.admin_password).await {
                Ok(_created) => (StatusCode::OK, Json(AuthResponse::ok(None))),
                Err(e) => (e.code.status(), Json(AuthResponse::failed(e.message))),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
