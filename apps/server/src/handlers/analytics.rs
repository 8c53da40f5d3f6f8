//! Analytics page: the trailing 6-month series, the top-5 products ranking
//! and the overall totals with profit margin.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use elegante_core::reports::{self, MonthPoint, TopProduct};
use elegante_core::{Money, Page, ANALYTICS_MONTHS, TOP_PRODUCTS_LIMIT};

use crate::error::ApiError;
use crate::routes::require_page;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTotals {
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
    /// total profit / total revenue × 100; 0 when revenue is 0.
    pub margin_percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Oldest month first, current month last.
    pub months: Vec<MonthPoint>,
    pub top_products: Vec<TopProduct>,
    /// Totals over the displayed window.
    pub totals: AnalyticsTotals,
}

/// GET /api/analytics
pub async fn view(State(state): State<AppState>) -> Result<Json<AnalyticsResponse>, ApiError> {
    require_page(&state, Page::Analytics).await?;

    let facts = state.db.sales().list_facts().await?;
    let today = Utc::now().date_naive();

    let months = reports::monthly_series(&facts, today, ANALYTICS_MONTHS);
    let top_products = reports::top_products(&facts, TOP_PRODUCTS_LIMIT);

    let revenue: Money = months.iter().map(|m| m.revenue).sum();
    let cost: Money = months.iter().map(|m| m.cost).sum();
    let profit = revenue - cost;

    Ok(Json(AnalyticsResponse {
        months,
        top_products,
        totals: AnalyticsTotals {
            revenue,
            cost,
            profit,
            margin_percent: reports::profit_margin_percent(revenue, profit),
        },
    }))
}
