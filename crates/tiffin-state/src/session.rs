//! # Session
//!
//! One customer session: the scope that owns the cart and location stores.
//!
//! ```text
//! Session::start(&config)
//!     │
//!     ├── config.storage.open() ──► Arc<dyn DurableStorage>
//!     ├── CartStore::new()
//!     ├── LocationStore::new(storage)   (restores the stored location)
//!     └── span "session" { session_id }
//!
//! session.end()  ── both stores dropped, cart lost, location kept in storage
//! ```

use std::sync::Arc;

use serde::Serialize;
use tiffin_storage::DurableStorage;
use tracing::{info, info_span, Span};
use uuid::Uuid;

use crate::cart::CartStore;
use crate::config::SessionConfig;
use crate::context::Context;
use crate::error::StateResult;
use crate::location::LocationStore;

/// Unique session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a random id.
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A running session.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    context: Context,
    span: Span,
}

impl Session {
    /// Opens the configured storage and starts a session on it.
    pub fn start(config: &SessionConfig) -> StateResult<Self> {
        let storage = config.storage.open()?;
        Ok(Self::with_storage(storage))
    }

    /// Starts a session on the given storage.
    pub fn with_storage(storage: Arc<dyn DurableStorage>) -> Self {
        let id = SessionId::new();
        let span = info_span!("session", session_id = %id);

        let context = span.in_scope(|| {
            let mut context = Context::new();
            context.manage(CartStore::new());
            context.manage(LocationStore::new(storage));
            info!("Session started");
            context
        });

        Session { id, context, span }
    }

    /// Session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The provider context, for code that resolves containers by type.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The session's tracing span. Enter it around work done for this session.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Cart container.
    pub fn cart(&self) -> StateResult<&CartStore> {
        self.context.state::<CartStore>()
    }

    /// Location container.
    pub fn location(&self) -> StateResult<&LocationStore> {
        self.context.state::<LocationStore>()
    }

    /// Ends the session, dropping its containers.
    pub fn end(self) {
        let _guard = self.span.enter();
        let cart_lines = self.cart().map_or(0, CartStore::line_count);
        info!(cart_lines, "Session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiffin_core::{Location, MenuItem};
    use tiffin_storage::{MemoryStorage, StorageConfig};

    fn dosa() -> MenuItem {
        MenuItem {
            id: "m1".into(),
            vendor_id: "v1".into(),
            name: "Masala Dosa".into(),
            description: None,
            price: 120.0,
            category: Some("South Indian".into()),
            image_url: None,
            is_veg: true,
            is_available: true,
        }
    }

    #[test]
    fn test_session_provides_both_stores() {
        let session = Session::with_storage(Arc::new(MemoryStorage::new()));

        assert!(session.cart().is_ok());
        assert!(session.location().is_ok());
        assert_eq!(session.context().len(), 2);
    }

    #[test]
    fn test_cart_is_per_session_location_is_durable() {
        let storage: Arc<dyn DurableStorage> = Arc::new(MemoryStorage::new());

        let first = Session::with_storage(Arc::clone(&storage));
        first.cart().unwrap().add_to_cart(&dosa(), "v1");
        first
            .location()
            .unwrap()
            .set_location(Location::new("12 MG Road", "Pune", "Camp").unwrap())
            .unwrap();
        first.end();

        let second = Session::with_storage(storage);
        assert_eq!(second.cart().unwrap().item_count(), 0);
        assert!(second.location().unwrap().has_location());
    }

    #[test]
    fn test_start_with_memory_config() {
        let config = SessionConfig {
            storage: StorageConfig::in_memory(),
            ..Default::default()
        };

        let session = Session::start(&config).unwrap();
        assert!(!session.location().unwrap().has_location());
    }

    #[test]
    fn test_start_with_file_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            storage: StorageConfig::file(dir.path().join("local-storage.json")),
            ..Default::default()
        };

        let session = Session::start(&config).unwrap();
        session
            .location()
            .unwrap()
            .set_location(Location::new("4 Park St", "Kolkata", "Park Street").unwrap())
            .unwrap();
        session.end();

        let restored = Session::start(&config).unwrap();
        assert_eq!(
            restored.location().unwrap().location().map(|l| l.city),
            Some("Kolkata".to_string())
        );
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::with_storage(Arc::new(MemoryStorage::new()));
        let b = Session::with_storage(Arc::new(MemoryStorage::new()));
        assert_ne!(a.id(), b.id());
    }
}
