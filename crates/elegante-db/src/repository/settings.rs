//! # Settings Repository
//!
//! Reads the static key/value configuration (currency code, store name).
//! Settings are seeded by migration and never written at runtime.

use sqlx::SqlitePool;

use crate::error::DbResult;
use elegante_core::Setting;

/// Repository for settings reads.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Lists all settings.
    pub async fn all(&self) -> DbResult<Vec<Setting>> {
        let settings = sqlx::query_as::<_, Setting>(
            r#"
            SELECT key, value FROM settings ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Gets one setting value by key.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_seeded_settings_present() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let all = repo.all().await.unwrap();
        assert!(all.iter().any(|s| s.key == "currency"));

        assert_eq!(repo.get("currency").await.unwrap().as_deref(), Some("PKR"));
        assert!(repo.get("missing").await.unwrap().is_none());
    }
}
