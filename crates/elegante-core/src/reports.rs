//! # Report Aggregation
//!
//! Every figure the page views display, computed as pure functions over
//! fetched rows. Handlers fetch, this module folds, nothing here touches
//! I/O.
//!
//! ## Where Each Function Surfaces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard   stock_value, month_figures (current month),               │
//! │              quantity_sold_on (today), quantity_sold_between (week)    │
//! │  Sales       sales_summary                                             │
//! │  Stock       stock_overview                                            │
//! │  Analytics   monthly_series (6 months), top_products (5),              │
//! │              profit_margin_percent                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cost Convention
//! Cost figures multiply each sale's quantity by the product's *current*
//! buy price, not a historical snapshot. Revenue uses the price frozen on
//! the sale row. This asymmetry is deliberate and must not be "fixed".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Sale Fact
// =============================================================================

/// A sale row joined with the product fields the reports need.
///
/// The data gateway produces these with a single join; every aggregate in
/// this module consumes them. Grouping identity for rankings is the
/// (product_name, product_sku) pair, not the product id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleFact {
    /// Effective date of the sale.
    pub sale_date: NaiveDate,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price in cents frozen at time of sale.
    pub price_cents: i64,

    /// The product's current buy price in cents.
    pub buy_price_cents: i64,

    /// Product display name at fetch time.
    pub product_name: String,

    /// Product SKU at fetch time.
    pub product_sku: String,
}

impl SaleFact {
    /// Revenue of this sale: frozen unit price × quantity.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.price_cents).multiply_quantity(self.quantity)
    }

    /// Cost of this sale: current buy price × quantity.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.buy_price_cents).multiply_quantity(self.quantity)
    }

    fn in_month(&self, year: i32, month: u32) -> bool {
        self.sale_date.year() == year && self.sale_date.month() == month
    }
}

// =============================================================================
// Output Shapes
// =============================================================================

/// Totals shown at the top of the Sales page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Σ(price × quantity), in cents.
    pub revenue: Money,
    /// Σ(quantity).
    pub items: i64,
    /// Row count.
    pub transactions: usize,
}

/// Revenue / cost / profit for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFigures {
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
    pub transactions: usize,
}

/// One point of the trailing monthly series on the Analytics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPoint {
    pub year: i32,
    pub month: u32,
    /// Display label, e.g. "Mar 2026".
    pub label: String,
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
    pub transactions: usize,
}

/// One row of the top-products ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub name: String,
    pub sku: String,
    pub revenue: Money,
    pub quantity: i64,
}

/// Totals shown at the top of the Stock Entries page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub products: usize,
    pub entries: usize,
    /// Σ(current product quantities).
    pub total_quantity: i64,
}

// =============================================================================
// Aggregates
// =============================================================================

/// Total stock value: Σ(buy_price × quantity) over exactly the given
/// product set.
pub fn stock_value(products: &[Product]) -> Money {
    products
        .iter()
        .map(|p| p.buy_price().multiply_quantity(p.quantity))
        .sum()
}

/// Sales page totals over the given rows.
pub fn sales_summary(facts: &[SaleFact]) -> SalesSummary {
    SalesSummary {
        revenue: facts.iter().map(SaleFact::revenue).sum(),
        items: facts.iter().map(|f| f.quantity).sum(),
        transactions: facts.len(),
    }
}

/// Revenue, cost and profit for one calendar month.
pub fn month_figures(facts: &[SaleFact], year: i32, month: u32) -> MonthlyFigures {
    let in_month: Vec<&SaleFact> = facts.iter().filter(|f| f.in_month(year, month)).collect();

    let revenue: Money = in_month.iter().map(|f| f.revenue()).sum();
    let cost: Money = in_month.iter().map(|f| f.cost()).sum();

    MonthlyFigures {
        revenue,
        cost,
        profit: revenue - cost,
        transactions: in_month.len(),
    }
}

/// Units sold (raw quantity, not revenue) on exactly one day.
pub fn quantity_sold_on(facts: &[SaleFact], day: NaiveDate) -> i64 {
    facts
        .iter()
        .filter(|f| f.sale_date == day)
        .map(|f| f.quantity)
        .sum()
}

/// Units sold within the closed date range [from, to].
///
/// The dashboard's "week" is the trailing 7 days inclusive:
/// `quantity_sold_between(facts, today - 6 days, today)`.
pub fn quantity_sold_between(facts: &[SaleFact], from: NaiveDate, to: NaiveDate) -> i64 {
    facts
        .iter()
        .filter(|f| f.sale_date >= from && f.sale_date <= to)
        .map(|f| f.quantity)
        .sum()
}

/// The trailing monthly series ending at (and including) the month of
/// `today`, oldest first.
pub fn monthly_series(facts: &[SaleFact], today: NaiveDate, months: u32) -> Vec<MonthPoint> {
    (0..months)
        .rev()
        .map(|back| {
            let (year, month) = months_back(today.year(), today.month(), back);
            let figures = month_figures(facts, year, month);
            MonthPoint {
                year,
                month,
                label: format!("{} {}", month_abbrev(month), year),
                revenue: figures.revenue,
                cost: figures.cost,
                profit: figures.profit,
                transactions: figures.transactions,
            }
        })
        .collect()
}

/// Top products ranked by revenue, grouped by the (name, sku) pair.
///
/// Ties are broken by (name, sku) ascending so the ranking is
/// deterministic.
pub fn top_products(facts: &[SaleFact], limit: usize) -> Vec<TopProduct> {
    let mut grouped: HashMap<(String, String), (Money, i64)> = HashMap::new();

    for fact in facts {
        let entry = grouped
            .entry((fact.product_name.clone(), fact.product_sku.clone()))
            .or_insert((Money::zero(), 0));
        entry.0 += fact.revenue();
        entry.1 += fact.quantity;
    }

    let mut ranking: Vec<TopProduct> = grouped
        .into_iter()
        .map(|((name, sku), (revenue, quantity))| TopProduct {
            name,
            sku,
            revenue,
            quantity,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.revenue
            .cents()
            .cmp(&a.revenue.cents())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.sku.cmp(&b.sku))
    });
    ranking.truncate(limit);
    ranking
}

/// Profit margin as a percentage; 0 when revenue is 0.
pub fn profit_margin_percent(revenue: Money, profit: Money) -> f64 {
    if revenue.is_zero() {
        return 0.0;
    }

    profit.cents() as f64 / revenue.cents() as f64 * 100.0
}

/// Stock Entries page totals.
pub fn stock_overview(products: &[Product], entries: usize) -> StockOverview {
    StockOverview {
        products: products.len(),
        entries,
        total_quantity: products.iter().map(|p| p.quantity).sum(),
    }
}

// =============================================================================
// Calendar Helpers
// =============================================================================

/// The (year, month) pair `back` calendar months before the given one.
///
/// Pure integer arithmetic; January minus one month lands in December of
/// the previous year.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
