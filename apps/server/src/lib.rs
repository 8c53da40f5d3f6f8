//! # Gents by Elegante - HTTP Application
//!
//! The application layer over elegante-core and elegante-db:
//!
//! - [`session`] - the persisted single-operator session store
//! - [`auth`] - password verification, user creation, admin bootstrap
//! - [`routes`] - the role-gated route table
//! - [`handlers`] - one module per page view
//! - [`error`] - the serialized API error boundary
//!
//! ## Control Flow
//! ```text
//! request ──► router ──► require_page(session, page) ──► handler
//!                 │                                        │
//!                 └── 401/403 on guard failure             ▼
//!                                              data gateway (elegante-db)
//!                                                          │
//!                                                          ▼
//!                                              aggregates (elegante-core)
//!                                                          │
//!                                                          ▼
//!                                                     JSON response
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod password;
pub mod routes;
pub mod session;

use config::ServerConfig;
use elegante_db::Database;
use session::SessionStore;

/// Shared application state.
///
/// Cloning is cheap: the database pool and the session store are both
/// shared handles.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub session: SessionStore,
    pub config: ServerConfig,
}

impl AppState {
    /// Assembles the application state.
    pub fn new(db: Database, session: SessionStore, config: ServerConfig) -> Self {
        AppState {
            db,
            session,
            config,
        }
    }
}
