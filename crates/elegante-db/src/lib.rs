//! # elegante-db: Database Layer for Gents by Elegante
//!
//! All SQL lives here: the SQLite pool, embedded migrations, and one
//! repository per persisted collection (`users`, `products`,
//! `stock_entries`, `sales`, `settings`).
//!
//! ## Quantity Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.quantity is derived state owned by this crate:               │
//! │                                                                         │
//! │  StockEntryRepository::record_entry  → quantity + n   (same tx)        │
//! │  SaleRepository::record_sale         → quantity - n   (same tx,        │
//! │                                        WHERE quantity >= n)            │
//! │                                                                         │
//! │  Callers never write quantity. The conditional update is the           │
//! │  concurrency guard; the advisory check in the app is a fast path.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{
    ProductRepository, SaleDetails, SaleRepository, SettingsRepository, StockEntryDetails,
    StockEntryRepository, UserRepository,
};
