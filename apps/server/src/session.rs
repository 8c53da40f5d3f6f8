//! # Session Store
//!
//! Holds the currently authenticated user's identity and role, persisted to
//! one local JSON file. No expiry logic.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  Startup ──► hydrate() ── file exists? ──► load into memory            │
//! │                              │                                          │
//! │                              └── no/corrupt ──► start signed out       │
//! │                                                                         │
//! │  login ok ──► set(user) ──► memory + file                              │
//! │  logout   ──► clear()   ──► memory + file, unconditionally             │
//! │                                                                         │
//! │  The persisted record is only (id, username, role).                    │
//! │  No password, no token.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The hydrated role is NOT re-validated against the users table; a role
//! change takes effect at the next login. Kept as specified.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use elegante_core::SessionUser;

/// The session store: one current user, in memory and on disk.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<SessionUser>>>,
    path: PathBuf,
}

impl SessionStore {
    /// Creates an empty (signed-out) store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore {
            current: Arc::new(RwLock::new(None)),
            path: path.into(),
        }
    }

    /// Loads the persisted session, if any, into memory.
    ///
    /// Called once at startup, before the server accepts requests. A
    /// missing or unreadable file means starting signed out; it is never an
    /// error.
    pub async fn hydrate(&self) {
        let user = match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                    None
                }
            },
            Err(_) => None,
        };

        if let Some(ref u) = user {
            info!(username = %u.username, role = %u.role, "Restored persisted session");
        } else {
            debug!("No persisted session, starting signed out");
        }

        *self.current.write().await = user;
    }

    /// The current user, if a session exists.
    pub async fn current(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    /// Populates the session and persists it.
    ///
    /// A failed write is logged and does not fail the login; the session
    /// then simply won't survive a restart.
    pub async fn set(&self, user: SessionUser) {
        if let Err(e) = self.persist(&user) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist session");
        }
        *self.current.write().await = Some(user);
    }

    /// Clears both in-memory and durable state unconditionally.
    pub async fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "Failed to remove session file");
            }
        }
        *self.current.write().await = None;
    }

    fn persist(&self, user: &SessionUser) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, raw)
    }

    /// The file the session persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use elegante_core::Role;
    use uuid::Uuid;

    fn temp_session_path() -> PathBuf {
        std::env::temp_dir().join(format!("elegante-session-{}.json", Uuid::new_v4()))
    }

    fn user(username: &str, role: Role) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_login_persists_and_hydrates() {
        let path = temp_session_path();

        let store = SessionStore::new(&path);
        store.hydrate().await;
        assert!(store.current().await.is_none());

        store.set(user("admin", Role::SuperAdmin)).await;
        assert_eq!(store.current().await.unwrap().username, "admin");

        // A fresh store over the same file restores the session.
        let restarted = SessionStore::new(&path);
        restarted.hydrate().await;
        let restored = restarted.current().await.unwrap();
        assert_eq!(restored.username, "admin");
        assert_eq!(restored.role, Role::SuperAdmin);

        restarted.clear().await;
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_disk() {
        let path = temp_session_path();

        let store = SessionStore::new(&path);
        store.set(user("counter", Role::SalesStaff)).await;
        store.clear().await;

        assert!(store.current().await.is_none());
        assert!(!path.exists());

        // Clearing a signed-out store is a no-op, not an error.
        store.clear().await;
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_signed_out() {
        let path = temp_session_path();
        std::fs::write(&path, "not json at all").unwrap();

        let store = SessionStore::new(&path);
        store.hydrate().await;
        assert!(store.current().await.is_none());

        store.clear().await;
    }

    #[tokio::test]
    async fn test_persisted_record_has_no_password() {
        let path = temp_session_path();

        let store = SessionStore::new(&path);
        store.set(user("admin", Role::Admin)).await;

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("admin"));
        assert!(!raw.to_lowercase().contains("password"));

        store.clear().await;
    }
}
