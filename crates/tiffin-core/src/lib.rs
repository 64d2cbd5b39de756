//! # tiffin-core: Pure Logic for the Tiffin Client
//!
//! This crate holds every rule of the client state layer as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiffin Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web UI (out of scope)                        │   │
//! │  │    Menu ──► Cart drawer ──► Location picker ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots + subscriptions              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tiffin-state (Session, Stores)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tiffin-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ location  │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │   Cart    │  │ Location  │  │   │
//! │  │   │  Order    │  │ currency  │  │  reduce   │  │  record   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (User, Vendor, MenuItem, Order, ...)
//! - [`money`] - Money type held in integer paise
//! - [`currency`] - Rupee display formatting
//! - [`cart`] - Cart snapshot and its reducer
//! - [`location`] - Delivery location and its storage record
//! - [`validation`] - Input validation for form-built records
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tiffin_core::cart::{reduce, CartAction};
//! use tiffin_core::currency::format_price_with_decimals;
//! use tiffin_core::MenuItem;
//!
//! let thali = MenuItem {
//!     id: "m1".into(),
//!     vendor_id: "v1".into(),
//!     name: "Veg Thali".into(),
//!     description: None,
//!     price: 149.6,
//!     category: None,
//!     image_url: None,
//!     is_veg: true,
//!     is_available: true,
//! };
//!
//! let cart = reduce(None, CartAction::Add { item: thali.clone(), vendor_id: "v1".into() });
//! let cart = reduce(cart.as_ref(), CartAction::Add { item: thali, vendor_id: "v1".into() });
//!
//! let total = cart.map(|c| c.total()).unwrap_or_default();
//! assert_eq!(format_price_with_decimals(total.rupees()), "₹299.20");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod currency;
pub mod error;
pub mod location;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use location::{Location, LOCATION_STORAGE_KEY};
pub use money::Money;
pub use types::*;
