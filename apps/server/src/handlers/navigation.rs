//! Navigation endpoint: the menu entries the current role may open.
//!
//! Derived from the same page→roles table as the route guards, so no link
//! is ever produced for a forbidden destination.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use elegante_core::{navigation, Page};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NavEntry {
    pub page: Page,
    pub label: &'static str,
    pub path: &'static str,
}

/// GET /api/navigation
pub async fn menu(State(state): State<AppState>) -> Result<Json<Vec<NavEntry>>, ApiError> {
    let user = state
        .session
        .current()
        .await
        .ok_or_else(ApiError::unauthenticated)?;

    let entries = navigation(user.role)
        .into_iter()
        .map(|page| NavEntry {
            page,
            label: page.label(),
            path: page.path(),
        })
        .collect();

    Ok(Json(entries))
}
