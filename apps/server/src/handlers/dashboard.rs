//! Dashboard page: the landing aggregates.
//!
//! ## Figures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  All roles        todaysSales    Σ quantity, sales dated today         │
//! │                   weeksSales     Σ quantity, trailing 7 days inclusive │
//! │                   productCount   fetched product rows                  │
//! │                                                                         │
//! │  Admin roles only stockValue     Σ(buy_price × quantity)               │
//! │                   monthlyRevenue Σ(price × quantity), current month    │
//! │                   monthlyCost    same sales × current buy price        │
//! │                   monthlyProfit  revenue − cost                        │
//! │                                                                         │
//! │  sales_staff sees no financial figures at all.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, Duration, Utc};
use serde::Serialize;

use elegante_core::reports;
use elegante_core::{Money, Page, Role, TRAILING_WEEK_DAYS};

use crate::error::ApiError;
use crate::routes::require_page;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Units sold today (raw quantity, not revenue).
    pub todays_sales: i64,

    /// Units sold in the trailing 7 days, today included.
    pub weeks_sales: i64,

    /// Total product count.
    pub product_count: usize,

    /// Financial figures; absent for sales_staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial: Option<DashboardFinancial>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFinancial {
    /// Σ(buy_price × quantity) over all products, in cents.
    pub stock_value: Money,
    pub monthly_revenue: Money,
    pub monthly_cost: Money,
    pub monthly_profit: Money,
}

/// GET /api/dashboard
pub async fn view(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let user = require_page(&state, Page::Dashboard).await?;

    // Products and sales are independent reads; fetch them concurrently.
    let products_repo = state.db.products();
    let sales_repo = state.db.sales();
    let (products, facts) = tokio::join!(
        products_repo.list(),
        sales_repo.list_facts()
    );
    let products = products?;
    let facts = facts?;

    let today = Utc::now().date_naive();
    let week_start = today - Duration::days(TRAILING_WEEK_DAYS - 1);

    let financial = match user.role {
        Role::SuperAdmin | Role::Admin => {
            let month = reports::month_figures(&facts, today.year(), today.month());
            Some(DashboardFinancial {
                stock_value: reports::stock_value(&products),
                monthly_revenue: month.revenue,
                monthly_cost: month.cost,
                monthly_profit: month.profit,
            })
        }
        Role::SalesStaff => None,
    };

    Ok(Json(DashboardResponse {
        todays_sales: reports::quantity_sold_on(&facts, today),
        weeks_sales: reports::quantity_sold_between(&facts, week_start, today),
        product_count: products.len(),
        financial,
    }))
}
