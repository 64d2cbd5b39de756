//! # Cart Store
//!
//! Holds the session's cart and publishes every new snapshot.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action               Store Method            Reducer Action         │
//! │  ─────────               ────────────            ──────────────         │
//! │                                                                         │
//! │  Tap "Add" ─────────────► add_to_cart() ────────► CartAction::Add       │
//! │                                                                         │
//! │  Stepper +/- ───────────► update_quantity() ────► UpdateQuantity        │
//! │                                                                         │
//! │  Tap "Remove" ──────────► remove_from_cart() ───► Remove                │
//! │                                                                         │
//! │  Order placed ──────────► clear_cart() ─────────► Clear                 │
//! │                                                                         │
//! │  Render ────────────────► snapshot() / subscribe() (read only)          │
//! │                                                                         │
//! │  NOTE: the reducer runs under the channel's write lock, so each         │
//! │        operation replaces the snapshot atomically.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no persistence: the cart lives and dies with its session.

use tiffin_core::cart::{reduce, CartAction};
use tiffin_core::{Cart, MenuItem, Money};
use tokio::sync::watch;
use tracing::{debug, info};

/// The session's cart container.
///
/// ## Example
/// ```rust
/// use tiffin_core::MenuItem;
/// use tiffin_state::CartStore;
///
/// let dosa = MenuItem {
///     id: "m1".into(),
///     vendor_id: "v1".into(),
///     name: "Masala Dosa".into(),
///     description: None,
///     price: 100.0,
///     category: None,
///     image_url: None,
///     is_veg: true,
///     is_available: true,
/// };
///
/// let store = CartStore::new();
/// store.add_to_cart(&dosa, "v1");
/// store.add_to_cart(&dosa, "v1");
/// assert_eq!(store.item_count(), 2);
/// assert_eq!(store.total().to_string(), "₹200.00");
/// ```
#[derive(Debug)]
pub struct CartStore {
    cart: watch::Sender<Option<Cart>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates a store with no cart.
    pub fn new() -> Self {
        let (cart, _) = watch::channel(None);
        CartStore { cart }
    }

    /// Adds one unit of `item`, replacing the cart if it belongs to another vendor.
    pub fn add_to_cart(&self, item: &MenuItem, vendor_id: &str) -> Option<Cart> {
        debug!(menu_item_id = %item.id, vendor_id, "Adding item to cart");
        self.dispatch(CartAction::Add {
            item: item.clone(),
            vendor_id: vendor_id.to_string(),
        })
    }

    /// Removes a line. No-op if the line is not in the cart.
    pub fn remove_from_cart(&self, menu_item_id: &str) -> Option<Cart> {
        debug!(menu_item_id, "Removing item from cart");
        self.dispatch(CartAction::Remove {
            menu_item_id: menu_item_id.to_string(),
        })
    }

    /// Sets a line's quantity. `quantity <= 0` removes the line.
    pub fn update_quantity(&self, menu_item_id: &str, quantity: i64) -> Option<Cart> {
        debug!(menu_item_id, quantity, "Updating cart quantity");
        self.dispatch(CartAction::UpdateQuantity {
            menu_item_id: menu_item_id.to_string(),
            quantity,
        })
    }

    /// Drops the cart.
    pub fn clear_cart(&self) -> Option<Cart> {
        debug!("Clearing cart");
        self.dispatch(CartAction::Clear)
    }

    /// Applies an action and publishes the resulting snapshot.
    ///
    /// Every receiver is notified, even when the snapshot is unchanged.
    pub fn dispatch(&self, action: CartAction) -> Option<Cart> {
        let mut next = None;

        self.cart.send_modify(|cart| {
            if let (Some(current), CartAction::Add { vendor_id, .. }) = (cart.as_ref(), &action) {
                if !current.is_from_vendor(vendor_id) {
                    info!(
                        previous_vendor = current.vendor_id(),
                        vendor_id = %vendor_id,
                        "Cart replaced by an item from another vendor"
                    );
                }
            }

            *cart = reduce(cart.as_ref(), action);
            next = cart.clone();
        });

        if let Some(cart) = &next {
            debug!(
                lines = cart.line_count(),
                items = cart.item_count(),
                total = %cart.total(),
                "Cart updated"
            );
        } else {
            debug!("Cart is empty");
        }

        next
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Option<Cart> {
        self.cart.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    ///
    /// The receiver starts with the current snapshot marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Option<Cart>> {
        self.cart.subscribe()
    }

    /// Sum of line quantities; 0 without a cart.
    pub fn item_count(&self) -> i64 {
        tiffin_core::cart::item_count(self.cart.borrow().as_ref())
    }

    /// Cart total; zero without a cart.
    pub fn total(&self) -> Money {
        self.cart.borrow().as_ref().map_or(Money::zero(), Cart::total)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.cart.borrow().as_ref().map_or(0, Cart::line_count)
    }

    /// Quantity of one menu item; 0 if absent.
    pub fn quantity_of(&self, menu_item_id: &str) -> i64 {
        self.cart
            .borrow()
            .as_ref()
            .map_or(0, |cart| cart.quantity_of(menu_item_id))
    }

    /// Vendor the cart belongs to.
    pub fn vendor_id(&self) -> Option<String> {
        self.cart
            .borrow()
            .as_ref()
            .map(|cart| cart.vendor_id().to_string())
    }

    /// Checks if there is no cart.
    pub fn is_empty(&self) -> bool {
        self.cart.borrow().is_none()
    }
}
