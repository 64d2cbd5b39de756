//! # Validation Module
//!
//! Input validation for records built from user input.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Address form (UI)                                            │
//! │  └── Immediate feedback (empty fields)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Location::new / with_coordinates                             │
//! │  └── THIS MODULE: required text, coordinate ranges                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: LocationStore::set_location                                  │
//! │  └── Accepts any Location unconditionally                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored records are NOT re-validated on load: the storage record is only
//! required to decode as JSON.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of an address line, city or area.
pub const MAX_ADDRESS_FIELD_LEN: usize = 200;

/// Validates a required text field and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_ADDRESS_FIELD_LEN`] characters
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::validate_required_text;
///
/// assert_eq!(validate_required_text("city", "  Pune ").unwrap(), "Pune");
/// assert!(validate_required_text("city", "   ").is_err());
/// ```
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_ADDRESS_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ADDRESS_FIELD_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates a latitude in degrees (-90 to 90).
pub fn validate_latitude(latitude: f64) -> ValidationResult<()> {
    validate_range("latitude", latitude, -90.0, 90.0)
}

/// Validates a longitude in degrees (-180 to 180).
pub fn validate_longitude(longitude: f64) -> ValidationResult<()> {
    validate_range("longitude", longitude, -180.0, 180.0)
}

fn validate_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    // NaN fails both comparisons, so test the accepted range directly
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
