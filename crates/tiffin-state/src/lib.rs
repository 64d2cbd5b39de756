//! # tiffin-state: Session State for Tiffin
//!
//! The state containers a customer session exposes to the UI: the cart and
//! the delivery location. Each container owns an immutable snapshot, replaces
//! it on every operation, and publishes it through a `tokio::sync::watch`
//! channel.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiffin Data Flow                                 │
//! │                                                                         │
//! │  UI (menu, cart drawer, location picker)                               │
//! │       │  calls                        ▲ watch::Receiver                 │
//! │       ▼                               │                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  tiffin-state (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   Session ── Context ──┬── CartStore      (cart.rs)             │   │
//! │  │                        └── LocationStore  (location.rs)         │   │
//! │  │   SessionConfig (config.rs)   StateError (error.rs)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  tiffin-core (Cart reducer, Location)   tiffin-storage (DurableStorage) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tiffin_core::Location;
//! use tiffin_state::Session;
//! use tiffin_storage::MemoryStorage;
//!
//! let session = Session::with_storage(Arc::new(MemoryStorage::new()));
//! let location = session.location().unwrap();
//!
//! location.open_location_modal();
//! location
//!     .set_location(Location::new("12 MG Road", "Pune", "Camp").unwrap())
//!     .unwrap();
//!
//! assert!(!location.is_modal_open());
//! assert_eq!(session.cart().unwrap().item_count(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod context;
pub mod error;
pub mod location;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartStore;
pub use config::{SessionConfig, DEFAULT_LOG_FILTER};
pub use context::Context;
pub use error::{ErrorCode, ErrorPayload, StateError, StateResult};
pub use location::{LocationState, LocationStore};
pub use session::{Session, SessionId};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tiffin_state=trace` - Show trace for the session layer only
/// - Default: `default_filter` (usually [`SessionConfig::log_filter`])
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
