//! # Sale Repository
//!
//! Database operations for sales.
//!
//! ## Transactional Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │             record_sale(product_id, qty, price, date, user)             │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    UPDATE products SET quantity = quantity - qty                       │
//! │      WHERE id = ? AND quantity >= qty                                  │
//! │      ├── 0 rows, product exists  → rollback, StockExhausted            │
//! │      ├── 0 rows, product missing → rollback, NotFound                  │
//! │      └── 1 row                   → stock reserved                      │
//! │    INSERT INTO sales (...)                                             │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Two concurrent sales cannot oversubscribe: whichever transaction      │
//! │  commits second sees the reduced quantity and fails the condition.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use elegante_core::reports::SaleFact;
use elegante_core::Sale;

/// A sale joined with the product and recorder fields the listing displays.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleDetails {
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

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale and decrements the product's quantity, in one
    /// transaction guarded by a conditional update.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - the recorded sale
    /// * `Err(DbError::StockExhausted)` - quantity no longer covers the sale
    /// * `Err(DbError::NotFound)` - unknown product
    pub async fn record_sale(
        &self,
        product_id: &str,
        quantity: i64,
        price_cents: i64,
        sale_date: NaiveDate,
        recorded_by: &str,
    ) -> DbResult<Sale> {
        debug!(
            product_id = %product_id,
            quantity = %quantity,
            price_cents = %price_cents,
            "Recording sale"
        );

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            price_cents,
            sale_date,
            recorded_by: recorded_by.to_string(),
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        // Reserve the stock first; the condition is the concurrency guard.
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?1
            WHERE id = ?2 AND quantity >= ?1
            "#,
        )
        .bind(quantity)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Distinguish a lost race from a vanished product. Dropping tx
            // rolls back either way.
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_one(&mut *tx)
                .await?;

            return if exists > 0 {
                Err(DbError::StockExhausted {
                    product_id: product_id.to_string(),
                    requested: quantity,
                })
            } else {
                Err(DbError::not_found("Product", product_id))
            };
        }

        sqlx::query(
            r#"
            INSERT INTO sales (id, product_id, quantity, price_cents, sale_date, recorded_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(sale.quantity)
        .bind(sale.price_cents)
        .bind(sale.sale_date)
        .bind(&sale.recorded_by)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(sale)
    }

    /// Lists all sales with product and recorder details, newest first.
    pub async fn list_with_details(&self) -> DbResult<Vec<SaleDetails>> {
        let sales = sqlx::query_as::<_, SaleDetails>(
            r#"
            SELECT
                s.id,
                s.product_id,
                p.name AS product_name,
                p.sku AS product_sku,
                s.quantity,
                s.price_cents,
                s.sale_date,
                s.recorded_by,
                u.username AS recorded_by_username,
                s.created_at
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            INNER JOIN users u ON u.id = s.recorded_by
            ORDER BY s.sale_date DESC, s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Fetches every sale as a report fact: the sale row joined with the
    /// product's current buy price, name and SKU. All aggregate math in
    /// `elegante_core::reports` consumes these.
    pub async fn list_facts(&self) -> DbResult<Vec<SaleFact>> {
        let facts = sqlx::query_as::<_, SaleFact>(
            r#"
            SELECT
                s.sale_date,
                s.quantity,
                s.price_cents,
                p.buy_price_cents,
                p.name AS product_name,
                p.sku AS product_sku
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(facts)
    }

    /// Counts sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
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
    use crate::repository::user::generate_user_id;
    use elegante_core::{Product, Role, User};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Database with one product (stock 10) and one user.
    async fn seeded_db() -> (Database, String, String) {
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
        db.stock_entries()
            .record_entry(&product.id, 10, day(2026, 8, 1))
            .await
            .unwrap();

        let user = User {
            id: generate_user_id(),
            username: "counter".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::SalesStaff,
            created_at: Utc::now(),
        };
        db.users().insert(&user).await.unwrap();

        (db, product.id, user.id)
    }

    #[tokio::test]
    async fn test_record_sale_decrements_quantity() {
        let (db, product_id, user_id) = seeded_db().await;

        db.sales()
            .record_sale(&product_id, 4, 90_000, day(2026, 8, 2), &user_id)
            .await
            .unwrap();

        let product = db.products().get_by_id(&product_id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 6);
        assert_eq!(db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_oversubscribed_sale_inserts_nothing() {
        let (db, product_id, user_id) = seeded_db().await;

        let err = db
            .sales()
            .record_sale(&product_id, 11, 90_000, day(2026, 8, 2), &user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StockExhausted { .. }));

        // No insert, no decrement.
        assert_eq!(db.sales().count().await.unwrap(), 0);
        let product = db.products().get_by_id(&product_id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
    }

    #[tokio::test]
    async fn test_exact_remaining_stock_sells_out() {
        let (db, product_id, user_id) = seeded_db().await;

        db.sales()
            .record_sale(&product_id, 10, 90_000, day(2026, 8, 2), &user_id)
            .await
            .unwrap();

        let product = db.products().get_by_id(&product_id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 0);

        // The very next unit is refused.
        let err = db
            .sales()
            .record_sale(&product_id, 1, 90_000, day(2026, 8, 2), &user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StockExhausted { .. }));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let (db, _, user_id) = seeded_db().await;

        let err = db
            .sales()
            .record_sale(&generate_product_id(), 1, 100, day(2026, 8, 2), &user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_with_details_and_facts() {
        let (db, product_id, user_id) = seeded_db().await;

        db.sales()
            .record_sale(&product_id, 3, 80_000, day(2026, 8, 2), &user_id)
            .await
            .unwrap();

        let details = db.sales().list_with_details().await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].product_sku, "SHIRT-01");
        assert_eq!(details[0].recorded_by_username, "counter");
        // The frozen price may differ from the product's sell price.
        assert_eq!(details[0].price_cents, 80_000);

        let facts = db.sales().list_facts().await.unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].buy_price_cents, 50_000);
        assert_eq!(facts[0].product_name, "Formal Shirt");
    }
}
