//! # Session Error Type
//!
//! Unified error type for the session layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tiffin                                 │
//! │                                                                         │
//! │  UI                          Session layer                              │
//! │  ──                          ─────────────                              │
//! │                                                                         │
//! │  session.location()?.set_location(loc)                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Not in context? ── StateError::MissingProvider ───────┐         │  │
//! │  │         │                                              │         │  │
//! │  │         ▼                                              ▼         │  │
//! │  │  Write failed?   ── StorageError ── StateError ── ErrorPayload ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI receives `{ "code": "STORAGE_ERROR", "message": "..." }`.

use serde::Serialize;
use thiserror::Error;
use tiffin_core::CoreError;
use tiffin_storage::StorageError;

/// Session layer errors.
#[derive(Debug, Error)]
pub enum StateError {
    /// A container was requested from a context that does not provide it.
    ///
    /// This is a wiring defect, not a runtime condition: the caller is
    /// running outside the session that owns the container.
    #[error("{container} must be used within a session that provides it")]
    MissingProvider { container: &'static str },

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be encoded for storage.
    #[error("Record error: {0}")]
    Record(#[from] CoreError),

    /// Session configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StateError {
    /// Creates a missing-provider error for container type `T`.
    pub fn missing_provider<T: ?Sized>() -> Self {
        StateError::MissingProvider {
            container: short_type_name(std::any::type_name::<T>()),
        }
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StateError::MissingProvider { .. } => ErrorCode::MissingProvider,
            StateError::Storage(_) => ErrorCode::StorageError,
            StateError::Record(_) => ErrorCode::RecordError,
            StateError::Config(_) => ErrorCode::ConfigError,
        }
    }
}

/// Strips the module path: `tiffin_state::cart::CartStore` → `CartStore`.
///
/// Generic arguments are kept whole: `a::Wrapper<b::Inner>` → `Wrapper<b::Inner>`.
fn short_type_name(full: &'static str) -> &'static str {
    let path_end = full.find('<').unwrap_or(full.len());
    let start = full[..path_end].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

/// Result type for session operations.
pub type StateResult<T> = Result<T, StateError>;

/// Error codes for the UI.
///
/// ## Usage in Frontend
/// ```typescript
/// switch (e.code) {
///   case 'STORAGE_ERROR':
///     toast('Could not save your location on this device');
///     break;
///   default:
///     toast('Something went wrong');
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Container used outside its session
    MissingProvider,

    /// Durable storage read/write failed
    StorageError,

    /// Record encoding failed
    RecordError,

    /// Session configuration rejected
    ConfigError,
}

/// What the UI receives when a session operation fails.
///
/// ```json
/// { "code": "STORAGE_ERROR", "message": "Storage error: ..." }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl From<&StateError> for ErrorPayload {
    fn from(err: &StateError) -> Self {
        ErrorPayload {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<StateError> for ErrorPayload {
    fn from(err: StateError) -> Self {
        ErrorPayload::from(&err)
    }
}
