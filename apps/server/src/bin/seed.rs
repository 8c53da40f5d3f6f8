//! # Seed Data Generator
//!
//! Populates the database with demo data for development: a handful of
//! menswear products, stock entries spread over recent months, and sales
//! recorded by a demo counter account.
//!
//! ## Usage
//! ```bash
//! # Seed the default database path
//! cargo run -p elegante-server --bin seed
//!
//! # Specify database path
//! ELEGANTE_DATABASE_PATH=./data/elegante.db cargo run -p elegante-server --bin seed
//! ```
//!
//! Seeding is skipped when products already exist, so running it twice is
//! harmless. Quantities flow through the real repositories: stock entries
//! increment and sales decrement, exactly as in production.

use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use elegante_core::{Product, Role};
use elegante_db::{Database, DbConfig};
use elegante_server::auth;
use elegante_server::config::ServerConfig;

/// Demo products: (name, sku, buy price cents, sell price cents).
const PRODUCTS: &[(&str, &str, i64, i64)] = &[
    ("Formal Shirt Slim Fit", "SHIRT-01", 180_000, 320_000),
    ("Formal Shirt Classic", "SHIRT-02", 160_000, 290_000),
    ("Leather Belt Brown", "BELT-01", 90_000, 180_000),
    ("Leather Belt Black", "BELT-02", 90_000, 180_000),
    ("Silk Tie Navy", "TIE-01", 60_000, 140_000),
    ("Waistcoat Charcoal", "WC-01", 350_000, 650_000),
    ("Cufflinks Silver", "CUFF-01", 120_000, 260_000),
    ("Dress Trousers Grey", "TRS-01", 220_000, 420_000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load()?;

    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    if db.products().count().await? > 0 {
        info!("Products already present, skipping seed");
        return Ok(());
    }

    // Accounts: the bootstrap admin plus a demo sales counter.
    auth::ensure_default_admin(&db, &config.admin_password).await?;
    let counter = match db.users().get_by_username("counter").await? {
        Some(user) => user,
        None => auth::create_user(&db, "counter", "counter123", Role::SalesStaff).await?,
    };

    let today = Utc::now().date_naive();
    let mut seeded = Vec::new();

    for &(name, sku, buy, sell) in PRODUCTS {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            buy_price_cents: buy,
            sell_price_cents: sell,
            quantity: 0,
            created_at: Utc::now(),
        };
        db.products().insert(&product).await?;
        seeded.push(product);
    }
    info!(count = seeded.len(), "Products seeded");

    // Stock arrives in three deliveries spread over the last four months.
    let mut entries = 0;
    for (index, product) in seeded.iter().enumerate() {
        for batch in 0..3 {
            let days_ago = 110 - batch * 40 - (index as i64 % 7);
            db.stock_entries()
                .record_entry(&product.id, 20 + 5 * batch, today - Duration::days(days_ago))
                .await?;
            entries += 1;
        }
    }
    info!(count = entries, "Stock entries seeded");

    // Sales across the analytics window, a few units every several days.
    let mut sales = 0;
    for (index, product) in seeded.iter().enumerate() {
        for step in 0..10 {
            let days_ago = 5 + step * 16 + (index as i64 % 5);
            let quantity = 1 + (step + index as i64) % 3;
            db.sales()
                .record_sale(
                    &product.id,
                    quantity,
                    product.sell_price_cents,
                    today - Duration::days(days_ago),
                    &counter.id,
                )
                .await?;
            sales += 1;
        }
    }
    info!(count = sales, "Sales seeded");

    info!("Seed complete");
    Ok(())
}
