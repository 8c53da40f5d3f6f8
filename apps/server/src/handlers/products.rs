//! Products page: listing and creation.
//!
//! Creation never accepts a quantity: stock arrives only through stock
//! entries, so new products start at 0 on hand.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use elegante_core::validation::{validate_price_cents, validate_product_name, validate_sku};
use elegante_core::{Page, Product};

use crate::error::ApiError;
use crate::routes::require_page;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub buy_price_cents: i64,
    pub sell_price_cents: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            sku: p.sku,
            buy_price_cents: p.buy_price_cents,
            sell_price_cents: p.sell_price_cents,
            quantity: p.quantity,
            created_at: p.created_at,
        }
    }
}

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, ApiError> {
    require_page(&state, Page::Products).await?;

    let products = state.db.products().list().await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    pub buy_price_cents: i64,
    pub sell_price_cents: i64,
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    require_page(&state, Page::Products).await?;

    validate_product_name(&req.name)?;
    validate_sku(&req.sku)?;
    validate_price_cents(req.buy_price_cents)?;
    validate_price_cents(req.sell_price_cents)?;

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        sku: req.sku.trim().to_string(),
        buy_price_cents: req.buy_price_cents,
        sell_price_cents: req.sell_price_cents,
        quantity: 0,
        created_at: Utc::now(),
    };

    state.db.products().insert(&product).await?;

    Ok((StatusCode::CREATED, Json(ProductDto::from(product))))
}
