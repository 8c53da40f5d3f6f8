//! # Route Table and Guards
//!
//! Maps URL paths to page handlers and enforces the page access matrix.
//!
//! ## Guard Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       require_page(state, page)                         │
//! │                                                                         │
//! │  No session                → 401 Unauthenticated, redirect "/login"    │
//! │  Session, role not allowed → 403 Forbidden (hard deny)                 │
//! │  Session, role allowed     → the current user, handler proceeds        │
//! │                                                                         │
//! │  The allowed set per page is Page::allowed_roles() in elegante-core;   │
//! │  the navigation endpoint filters by the same table.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use elegante_core::{Page, SessionUser};

use crate::auth;
use crate::error::ApiError;
use crate::handlers;
use crate::AppState;

/// Admits the current session to a page, or denies the request.
pub async fn require_page(state: &AppState, page: Page) -> Result<SessionUser, ApiError> {
    let user = state
        .session
        .current()
        .await
        .ok_or_else(ApiError::unauthenticated)?;

    if !page.permits(user.role) {
        return Err(ApiError::forbidden(page));
    }

    Ok(user)
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    // The authentication endpoint mirrors the original function's CORS
    // surface: any origin, POST/OPTIONS.
    let auth_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Authentication service endpoint (bearer-gated)
        .route("/api/auth", post(auth::handle).layer(auth_cors))
        // Session lifecycle
        .route("/api/session/login", post(handlers::session::login))
        .route("/api/session/logout", post(handlers::session::logout))
        .route("/api/session", get(handlers::session::current))
        // Authenticated, role-independent
        .route("/api/navigation", get(handlers::navigation::menu))
        .route("/api/settings", get(handlers::settings::view))
        // Page views
        .route("/api/dashboard", get(handlers::dashboard::view))
        .route(
            "/api/products",
            get(handlers::products::list).post(handlers::products::create),
        )
        .route(
            "/api/stock-entries",
            get(handlers::stock_entries::list).post(handlers::stock_entries::create),
        )
        .route(
            "/api/sales",
            get(handlers::sales::list).post(handlers::sales::create),
        )
        .route("/api/analytics", get(handlers::analytics::view))
        .route(
            "/api/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness probe, no authentication.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = state.db.health_check().await;
    Json(serde_json::json!({
        "status": "ok",
        "database": database,
    }))
}
