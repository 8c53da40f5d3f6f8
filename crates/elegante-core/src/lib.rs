//! # elegante-core: Pure Business Logic for Gents by Elegante
//!
//! This crate is the **heart** of the backend. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Gents by Elegante Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Layer (apps/server)                     │   │
//! │  │    session ──► route guards ──► page handlers                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ elegante-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  access   │  │  reports  │  │ validation│  │   │
//! │  │   │  Product  │  │ Page/Role │  │ aggregate │  │   rules   │  │   │
//! │  │   │ Sale/User │  │  matrix   │  │   math    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 elegante-db (Database Layer)                    │   │
//! │  │          SQLite queries, migrations, repositories               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StockEntry, Sale, User, Role)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`access`] - The page-to-allowed-roles matrix and navigation filtering
//! - [`reports`] - Every aggregate the page views display
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Closed Enums**: Roles and pages are enums; the access matrix is an
//!    exhaustive match, so adding either forces a compile-time decision

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod error;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use elegante_core::Money` instead of
// `use elegante_core::money::Money`

pub use access::{navigation, Page};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Username of the bootstrap administrator account.
///
/// Created on every application start if absent; the check-then-create is
/// idempotent.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Months covered by the Analytics trailing series, current month included.
pub const ANALYTICS_MONTHS: u32 = 6;

/// Rows in the Analytics top-products ranking.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Days in the dashboard's trailing "week" window, today included.
pub const TRAILING_WEEK_DAYS: i64 = 7;
