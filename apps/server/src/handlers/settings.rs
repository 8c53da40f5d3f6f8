//! Settings endpoint: the static key/value configuration (currency code,
//! store name). Readable by any authenticated role.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::AppState;

/// GET /api/settings
pub async fn view(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    state
        .session
        .current()
        .await
        .ok_or_else(ApiError::unauthenticated)?;

    let settings = state.db.settings().all().await?;

    Ok(Json(
        settings.into_iter().map(|s| (s.key, s.value)).collect(),
    ))
}
