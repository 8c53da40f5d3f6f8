//! # Stock Entry Repository
//!
//! Database operations for stock additions.
//!
//! ## Transactional Increment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  record_entry(product_id, qty, date)                    │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO stock_entries (...)                                     │
//! │    UPDATE products SET quantity = quantity + qty WHERE id = ?          │
//! │      └── 0 rows? product vanished → rollback, NotFound                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The entry and the quantity bump land together or not at all.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use elegante_core::StockEntry;

/// A stock entry joined with the product fields the listing displays.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StockEntryDetails {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i64,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Repository for stock entry database operations.
#[derive(Debug, Clone)]
pub struct StockEntryRepository {
    pool: SqlitePool,
}

impl StockEntryRepository {
    /// Creates a new StockEntryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockEntryRepository { pool }
    }

    /// Records a stock addition and increments the product's quantity, in
    /// one transaction.
    ///
    /// ## Returns
    /// * `Ok(StockEntry)` - the recorded entry
    /// * `Err(DbError::NotFound)` - unknown product
    pub async fn record_entry(
        &self,
        product_id: &str,
        quantity: i64,
        entry_date: NaiveDate,
    ) -> DbResult<StockEntry> {
        debug!(product_id = %product_id, quantity = %quantity, "Recording stock entry");

        let entry = StockEntry {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            entry_date,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO stock_entries (id, product_id, quantity, entry_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.product_id)
        .bind(entry.quantity)
        .bind(entry.entry_date)
        .bind(entry.created_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE products SET quantity = quantity + ?1 WHERE id = ?2
            "#,
        )
        .bind(entry.quantity)
        .bind(&entry.product_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Dropping tx rolls back the insert.
            return Err(DbError::not_found("Product", product_id));
        }

        tx.commit().await?;

        Ok(entry)
    }

    /// Lists all stock entries with their product details, newest first.
    pub async fn list_with_products(&self) -> DbResult<Vec<StockEntryDetails>> {
        let entries = sqlx::query_as::<_, StockEntryDetails>(
            r#"
            SELECT
                e.id,
                e.product_id,
                p.name AS product_name,
                p.sku AS product_sku,
                e.quantity,
                e.entry_date,
                e.created_at
            FROM stock_entries e
            INNER JOIN products p ON p.id = e.product_id
            ORDER BY e.entry_date DESC, e.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Counts stock entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock_entries")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::generate_product_id;
    use elegante_core::Product;

    async fn seeded_db() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = Product {
            id: generate_product_id(),
            name: "Formal Shirt".to_string(),
            sku: "SHIRT-01".to_string(),
            buy_price_cents: 50_000,
            sell_price_cents: 90_000,
            quantity: 0,
            created_at: Utc::now(),
        };
        db.products().insert(&product).await.unwrap();
        (db, product.id)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_record_entry_increments_quantity() {
        let (db, product_id) = seeded_db().await;
        let repo = db.stock_entries();

        repo.record_entry(&product_id, 10, day(2026, 8, 1)).await.unwrap();
        repo.record_entry(&product_id, 5, day(2026, 8, 2)).await.unwrap();

        let product = db.products().get_by_id(&product_id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 15);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_product_rolls_back() {
        let (db, _) = seeded_db().await;
        let repo = db.stock_entries();

        let missing = generate_product_id();
        let err = repo.record_entry(&missing, 3, day(2026, 8, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // The insert must not have survived the rollback.
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_with_products_newest_first() {
        let (db, product_id) = seeded_db().await;
        let repo = db.stock_entries();

        repo.record_entry(&product_id, 10, day(2026, 8, 1)).await.unwrap();
        repo.record_entry(&product_id, 5, day(2026, 8, 3)).await.unwrap();

        let listed = repo.list_with_products().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].entry_date, day(2026, 8, 3));
        assert_eq!(listed[0].product_sku, "SHIRT-01");
    }
}
