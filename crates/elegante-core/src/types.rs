//! # Domain Types
//!
//! Core domain types used throughout the Gents by Elegante backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   StockEntry    │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku (business) │   │  product_id(FK) │   │  product_id(FK) │       │
//! │  │  buy/sell price │   │  quantity (+)   │   │  quantity (−)   │       │
//! │  │  quantity       │   │  entry_date     │   │  price snapshot │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      User       │   │      Role       │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  username (uniq)│   │  SuperAdmin     │                             │
//! │  │  password_hash  │   │  Admin          │                             │
//! │  │  role           │   │  SalesStaff     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity Ownership
//! `Product.quantity` is derived state: it is only ever written by the
//! repository transactions that insert a [`StockEntry`] (increment) or a
//! [`Sale`] (conditional decrement). No page handler writes it directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Access role of a user account.
///
/// A closed enumeration: adding a role forces a compile-time decision at
/// every exhaustive match (notably the page access matrix in
/// [`crate::access`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including user administration.
    SuperAdmin,
    /// Full operational access, no user administration.
    Admin,
    /// Recording sales and the restricted dashboard only.
    SalesStaff,
}

impl Role {
    /// Stable wire/storage spelling of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::SalesStaff => "sales_staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account.
///
/// The password is stored as an argon2id PHC hash string, never in clear.
/// Username uniqueness is enforced by the store (UNIQUE index), not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique login name.
    pub username: String,

    /// Argon2id PHC hash of the password.
    pub password_hash: String,

    /// Access role.
    pub role: Role,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Session User
// =============================================================================

/// The identity slice of a [`User`] carried by the session.
///
/// This is exactly what the session store persists to disk: id, username
/// and role. No password material, no token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in inventory and available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Purchase price in cents (smallest currency unit).
    pub buy_price_cents: i64,

    /// Selling price in cents. Auto-fills the sale form; a sale may
    /// override it, so `Sale.price_cents` is the authoritative snapshot.
    pub sell_price_cents: i64,

    /// Current on-hand quantity. Derived state, see module docs.
    pub quantity: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the purchase price as a Money value.
    #[inline]
    pub fn buy_price(&self) -> Money {
        Money::from_cents(self.buy_price_cents)
    }

    /// Returns the selling price as a Money value.
    #[inline]
    pub fn sell_price(&self) -> Money {
        Money::from_cents(self.sell_price_cents)
    }

    /// Checks whether the last-fetched quantity covers a requested sale.
    ///
    /// Advisory only: the authoritative guard is the conditional decrement
    /// inside the sale transaction.
    #[inline]
    pub fn covers(&self, requested: i64) -> bool {
        self.quantity >= requested
    }
}

// =============================================================================
// Stock Entry
// =============================================================================

/// A stock addition against one product.
///
/// Creating one increments the referenced product's quantity by `quantity`,
/// inside the same transaction as the insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockEntry {
    pub id: String,
    pub product_id: String,
    /// Quantity added. Always positive.
    pub quantity: i64,
    /// Effective date of the addition (may differ from `created_at`).
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction for one product.
///
/// Creating one decrements the product's quantity by `quantity`, guarded by
/// a conditional update so stock can never go negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    /// Quantity sold. Always positive.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen; may differ from the
    /// product's current sell price).
    pub price_cents: i64,
    /// Effective date of the sale.
    pub sale_date: NaiveDate,
    /// The user who recorded the sale.
    pub recorded_by: String,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Revenue of this sale: unit price × quantity.
    #[inline]
    pub fn revenue(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Setting
// =============================================================================

/// A key/value configuration pair (e.g. the currency code).
///
/// Essentially static; seeded by migration and only read at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
