//! Page handlers, one module per page view, plus the session endpoints.
//!
//! Every handler follows the same shape: guard (session + page role) →
//! fetch rows from the data gateway → fold aggregates with
//! `elegante_core::reports` → respond with a camelCase DTO.

pub mod analytics;
pub mod dashboard;
pub mod navigation;
pub mod products;
pub mod sales;
pub mod session;
pub mod settings;
pub mod stock_entries;
pub mod users;
