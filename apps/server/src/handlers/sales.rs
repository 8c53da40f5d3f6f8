//! Sales page: listing with details, summary totals, and sale creation.
//!
//! ## Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/sales { productId, quantity, priceCents?, saleDate? }        │
//! │                                                                         │
//! │  1. validate quantity > 0, price >= 0 if given                         │
//! │  2. fetch product                                                       │
//! │     ├── missing → 404                                                   │
//! │     └── quantity > product.quantity → 422 (advisory pre-check)         │
//! │  3. price omitted → auto-fill the product's current sell price         │
//! │  4. record_sale: conditional decrement + insert, one transaction       │
//! │     └── lost the race anyway → 422, nothing inserted                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use elegante_core::reports::{self, SalesSummary};
use elegante_core::validation::{validate_price_cents, validate_quantity, validate_uuid};
use elegante_core::{CoreError, Page, Sale};
use elegante_db::SaleDetails;

use crate::error::ApiError;
use crate::routes::require_page;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub sale_date: NaiveDate,
    pub recorded_by: String,
    pub recorded_by_username: String,
    pub created_at: DateTime<Utc>,
}

impl From<SaleDetails> for SaleDto {
    fn from(s: SaleDetails) -> Self {
        SaleDto {
            id: s.id,
            product_id: s.product_id,
            product_name: s.product_name,
            product_sku: s.product_sku,
            quantity: s.quantity,
            price_cents: s.price_cents,
            sale_date: s.sale_date,
            recorded_by: s.recorded_by,
            recorded_by_username: s.recorded_by_username,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    pub sales: Vec<SaleDto>,
    /// Revenue, Σ(quantity), row count.
    pub summary: SalesSummary,
}

/// GET /api/sales
pub async fn list(State(state): State<AppState>) -> Result<Json<SalesResponse>, ApiError> {
    require_page(&state, Page::Sales).await?;

    let sales_repo = state.db.sales();
    let facts_repo = state.db.sales();
    let (sales, facts) = tokio::join!(
        sales_repo.list_with_details(),
        facts_repo.list_facts()
    );
    let sales = sales?;
    let facts = facts?;

    Ok(Json(SalesResponse {
        sales: sales.into_iter().map(SaleDto::from).collect(),
        summary: reports::sales_summary(&facts),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents; omitted means the product's current sell price.
    pub price_cents: Option<i64>,
    /// Effective date; defaults to today.
    pub sale_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSale {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub sale_date: NaiveDate,
    pub recorded_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<Sale> for CreatedSale {
    fn from(s: Sale) -> Self {
        CreatedSale {
            id: s.id,
            product_id: s.product_id,
            quantity: s.quantity,
            price_cents: s.price_cents,
            sale_date: s.sale_date,
            recorded_by: s.recorded_by,
            created_at: s.created_at,
        }
    }
}

/// POST /api/sales
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<CreatedSale>), ApiError> {
    let user = require_page(&state, Page::Sales).await?;

    validate_uuid("product_id", &req.product_id)?;
    validate_quantity(req.quantity)?;
    if let Some(price) = req.price_cents {
        validate_price_cents(price)?;
    }

    let product = state
        .db
        .products()
        .get_by_id(&req.product_id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(req.product_id.clone()))
        .map_err(ApiError::from)?;

    // Advisory pre-check against the last-fetched quantity. The
    // transactional decrement below is the authoritative guard.
    if !product.covers(req.quantity) {
        return Err(CoreError::InsufficientStock {
            sku: product.sku,
            available: product.quantity,
            requested: req.quantity,
        }
        .into());
    }

    // Omitted price auto-fills the current sell price.
    let price_cents = req.price_cents.unwrap_or(product.sell_price_cents);
    let sale_date = req.sale_date.unwrap_or_else(|| Utc::now().date_naive());

    let sale = state
        .db
        .sales()
        .record_sale(&req.product_id, req.quantity, price_cents, sale_date, &user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedSale::from(sale))))
}
