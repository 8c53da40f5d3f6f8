//! Stock Entries page: listing with product details, summary totals, and
//! creation. No advisory checks on entry: additions are always allowed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::reports::{self, StockOverview};
use elegante_core::validation::{validate_quantity, validate_uuid};
use elegante_core::{Page, StockEntry};
use elegante_db::StockEntryDetails;

use crate::error::ApiError;
use crate::routes::require_page;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntryDto {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i64,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<StockEntryDetails> for StockEntryDto {
    fn from(e: StockEntryDetails) -> Self {
        StockEntryDto {
            id: e.id,
            product_id: e.product_id,
            product_name: e.product_name,
            product_sku: e.product_sku,
            quantity: e.quantity,
            entry_date: e.entry_date,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntriesResponse {
    pub entries: Vec<StockEntryDto>,
    /// Product count, entry count, Σ(current product quantities).
    pub summary: StockOverview,
}

/// GET /api/stock-entries
pub async fn list(State(state): State<AppState>) -> Result<Json<StockEntriesResponse>, ApiError> {
    require_page(&state, Page::StockEntries).await?;

    let stock_repo = state.db.stock_entries();
    let products_repo = state.db.products();
    let (entries, products) = tokio::join!(
        stock_repo.list_with_products(),
        products_repo.list()
    );
    let entries = entries?;
    let products = products?;

    let summary = reports::stock_overview(&products, entries.len());

    Ok(Json(StockEntriesResponse {
        entries: entries.into_iter().map(StockEntryDto::from).collect(),
        summary,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockEntryRequest {
    pub product_id: String,
    pub quantity: i64,
    /// Effective date; defaults to today.
    pub entry_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStockEntry {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<StockEntry> for CreatedStockEntry {
    fn from(e: StockEntry) -> Self {
        CreatedStockEntry {
            id: e.id,
            product_id: e.product_id,
            quantity: e.quantity,
            entry_date: e.entry_date,
            created_at: e.created_at,
        }
    }
}

/// POST /api/stock-entries
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateStockEntryRequest>,
) -> Result<(StatusCode, Json<CreatedStockEntry>), ApiError> {
    require_page(&state, Page::StockEntries).await?;

    validate_uuid("product_id", &req.product_id)?;
    validate_quantity(req.quantity)?;

    let entry_date = req.entry_date.unwrap_or_else(|| Utc::now().date_naive());

    let entry = state
        .db
        .stock_entries()
        .record_entry(&req.product_id, req.quantity, entry_date)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedStockEntry::from(entry))))
}
