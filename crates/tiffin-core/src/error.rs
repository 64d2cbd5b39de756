//! # Error Types
//!
//! Domain-specific error types for tiffin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiffin-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiffin-storage errors (separate crate)                                │
//! │  └── StorageError     - Durable storage failures                       │
//! │                                                                         │
//! │  tiffin-state errors (session layer)                                   │
//! │  └── StateError       - What the UI sees (with an error code)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StateError → UI                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart reducer has no error path: every cart operation is total.
//! Errors only arise when building records from user input or when decoding
//! the stored location record.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored or received record could not be decoded.
    ///
    /// ## When This Occurs
    /// - The stored location is not JSON
    /// - The JSON is missing `address`, `city` or `area`
    ///
    /// The location container treats this as "no location" and deletes the
    /// stored record; it is never shown to the user.
    #[error("Invalid {record} record: {source}")]
    InvalidRecord {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used when records are built from user input (e.g. the address form).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "city".to_string(),
        };
        assert_eq!(err.to_string(), "city is required");

        let err = ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90.0,
            max: 90.0,
        };
        assert_eq!(err.to_string(), "latitude must be between -90 and 90");
    }

    #[test]
    fn test_invalid_record_message() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = CoreError::InvalidRecord {
            record: "location",
            source,
        };
        assert!(err.to_string().starts_with("Invalid location record:"));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "address".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
