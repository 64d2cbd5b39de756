//! # Cart
//!
//! The single-vendor shopping cart and its pure reducer.
//!
//! ## Snapshot Semantics
//! A cart is never patched in place. Every operation takes the current
//! snapshot (`Option<&Cart>`, where `None` means "no active order") and
//! returns the complete next snapshot.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Machine                                   │
//! │                                                                         │
//! │              Add(item, v)                                               │
//! │   ┌────────┐ ───────────────────────► ┌──────────────────┐             │
//! │   │  None  │                          │ Some(Cart { v }) │◄──┐         │
//! │   └────────┘ ◄─────────────────────── └──────────────────┘   │         │
//! │        ▲      Remove(last line)             │  │   Add(item, v)       │
//! │        │      UpdateQuantity(last, ≤0)      │  │   Remove / Update    │
//! │        │      Clear                         │  └──────────────────────┘│
//! │        │                                    │                          │
//! │        │                                    │ Add(item, w), w ≠ v      │
//! │        │                                    ▼                          │
//! │        │                          ┌──────────────────┐                 │
//! │        └───────────────────────── │ Some(Cart { w }) │  (old discarded) │
//! │                                   └──────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A cart holds lines from exactly one vendor
//! - A cart has at least one line (an empty cart is `None`)
//! - Lines are unique by `menu_item_id` and have `quantity >= 1`
//! - `total` always equals the sum of `price × quantity` over the lines
//!   (quantities and totals saturate at the i64 bound instead of overflowing)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{MenuItem, OrderItem};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart.
///
/// ## Price Freezing
/// `price` and `menu_item` are captured when the item is first added. Adding
/// the same item again only bumps the quantity; a later catalog price change
/// does not reach lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// ID of the referenced menu item.
    pub menu_item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    #[ts(type = "number")]
    pub price: Money,

    /// Quantity, always >= 1.
    pub quantity: i64,

    /// Full catalog entry at time of adding, for display.
    pub menu_item: MenuItem,
}

impl CartLine {
    /// Creates a single-quantity line from a menu item.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        CartLine {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price(),
            quantity: 1,
            menu_item: item.clone(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The active cart of a session.
///
/// Fields are private so the invariants above cannot be broken from outside;
/// new carts come only from [`Cart::new`] and the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    vendor_id: String,
    items: Vec<CartLine>,
    #[ts(type = "number")]
    total: Money,
}

impl Cart {
    /// Starts a cart with one unit of `item` from `vendor_id`.
    pub fn new(item: &MenuItem, vendor_id: impl Into<String>) -> Self {
        let line = CartLine::from_menu_item(item);
        Cart {
            vendor_id: vendor_id.into(),
            total: line.line_total(),
            items: vec![line],
        }
    }

    /// Builds a cart from lines, recomputing the total.
    ///
    /// Returns `None` when there are no lines left.
    fn from_lines(vendor_id: String, items: Vec<CartLine>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let total = items.iter().map(CartLine::line_total).sum();
        Some(Cart {
            vendor_id,
            items,
            total,
        })
    }

    /// The vendor every line belongs to.
    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of all line quantities (saturating at `i64::MAX`).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Finds the line for a menu item.
    pub fn line(&self, menu_item_id: &str) -> Option<&CartLine> {
        self.items
            .iter()
            .find(|line| line.menu_item_id == menu_item_id)
    }

    /// Quantity of a menu item in the cart (0 when absent).
    pub fn quantity_of(&self, menu_item_id: &str) -> i64 {
        self.line(menu_item_id).map_or(0, |line| line.quantity)
    }

    /// Checks whether the cart belongs to `vendor_id`.
    pub fn is_from_vendor(&self, vendor_id: &str) -> bool {
        self.vendor_id == vendor_id
    }

    /// Order lines for the checkout payload.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(OrderItem::from).collect()
    }

    /// Next snapshot after adding one unit of `item` (same vendor).
    fn with_item_added(&self, item: &MenuItem) -> Cart {
        let mut items = self.items.clone();
        match items.iter_mut().find(|line| line.menu_item_id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => items.push(CartLine::from_menu_item(item)),
        }
        let total = items.iter().map(CartLine::line_total).sum();
        Cart {
            vendor_id: self.vendor_id.clone(),
            items,
            total,
        }
    }

    /// Next snapshot after removing the line for `menu_item_id`.
    ///
    /// Unknown IDs leave the cart unchanged. `None` when the last line goes.
    fn without_line(&self, menu_item_id: &str) -> Option<Cart> {
        let items = self
            .items
            .iter()
            .filter(|line| line.menu_item_id != menu_item_id)
            .cloned()
            .collect();
        Cart::from_lines(self.vendor_id.clone(), items)
    }

    /// Next snapshot after setting the quantity of `menu_item_id`.
    ///
    /// A quantity of zero or below removes the line.
    fn with_quantity(&self, menu_item_id: &str, quantity: i64) -> Option<Cart> {
        if quantity <= 0 {
            return self.without_line(menu_item_id);
        }
        let items = self
            .items
            .iter()
            .map(|line| {
                if line.menu_item_id == menu_item_id {
                    CartLine {
                        quantity,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        Cart::from_lines(self.vendor_id.clone(), items)
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// The four ways a cart can change.
///
/// Deserializable so the UI can send actions as JSON:
/// ```json
/// { "type": "update_quantity", "menuItemId": "m1", "quantity": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CartAction {
    /// Add one unit of `item` from `vendor_id`.
    Add { item: MenuItem, vendor_id: String },
    /// Remove a line entirely.
    Remove { menu_item_id: String },
    /// Set a line's quantity (absolute, not a delta).
    UpdateQuantity { menu_item_id: String, quantity: i64 },
    /// Drop the cart.
    Clear,
}

/// Computes the next cart snapshot. Total: every action succeeds.
///
/// ## Behavior
/// - `Add`: a new cart if there is none or the vendor differs (the old cart
///   is discarded without confirmation); otherwise bump or append the line
/// - `Remove`: no-op if the cart or line is absent; `None` after the last line
/// - `UpdateQuantity`: `quantity <= 0` behaves as `Remove`; otherwise an
///   absolute set, no-op if the cart or line is absent
/// - `Clear`: always `None`
///
/// ## Example
/// ```rust
/// use tiffin_core::cart::{reduce, CartAction};
/// use tiffin_core::MenuItem;
///
/// let item = MenuItem {
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
/// let cart = reduce(None, CartAction::Add { item, vendor_id: "v1".into() });
/// assert_eq!(cart.as_ref().map(|c| c.item_count()), Some(1));
///
/// let cart = reduce(cart.as_ref(), CartAction::Remove { menu_item_id: "m1".into() });
/// assert!(cart.is_none());
/// ```
pub fn reduce(cart: Option<&Cart>, action: CartAction) -> Option<Cart> {
    match action {
        CartAction::Add { item, vendor_id } => match cart {
            Some(cart) if cart.is_from_vendor(&vendor_id) => Some(cart.with_item_added(&item)),
            _ => Some(Cart::new(&item, vendor_id)),
        },
        CartAction::Remove { menu_item_id } => {
            cart.and_then(|cart| cart.without_line(&menu_item_id))
        }
        CartAction::UpdateQuantity {
            menu_item_id,
            quantity,
        } => cart.and_then(|cart| cart.with_quantity(&menu_item_id, quantity)),
        CartAction::Clear => None,
    }
}

/// Item count of an optional cart (0 when there is no cart).
pub fn item_count(cart: Option<&Cart>) -> i64 {
    cart.map_or(0, Cart::item_count)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_item(id: &str, vendor_id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            vendor_id: vendor_id.to_string(),
            name: format!("Item {}", id),
            description: None,
            price,
            category: None,
            image_url: None,
            is_veg: true,
            is_available: true,
        }
    }

    fn add(cart: Option<&Cart>, item: &MenuItem, vendor_id: &str) -> Option<Cart> {
        reduce(
            cart,
            CartAction::Add {
                item: item.clone(),
                vendor_id: vendor_id.to_string(),
            },
        )
    }

    fn recomputed_total(cart: &Cart) -> Money {
        cart.items()
            .iter()
            .map(|line| line.price * line.quantity)
            .sum()
    }

    #[test]
    fn test_add_to_empty_creates_cart() {
        let item = menu_item("m1", "v1", 100.0);
        let cart = add(None, &item, "v1").unwrap();

        assert_eq!(cart.vendor_id(), "v1");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].menu_item_id, "m1");
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[0].menu_item, item);
        assert_eq!(cart.total(), Money::from_rupees(100.0));
    }

    #[test]
    fn test_scenario_add_add_update_remove() {
        let item = menu_item("m1", "v1", 100.0);

        let cart = add(None, &item, "v1");
        assert_eq!(cart.as_ref().unwrap().total(), Money::from_rupees(100.0));

        let cart = add(cart.as_ref(), &item, "v1").unwrap();
        assert_eq!(cart.quantity_of("m1"), 2);
        assert_eq!(cart.total(), Money::from_rupees(200.0));

        let cart = reduce(
            Some(&cart),
            CartAction::UpdateQuantity {
                menu_item_id: "m1".to_string(),
                quantity: 5,
            },
        )
        .unwrap();
        assert_eq!(cart.quantity_of("m1"), 5);
        assert_eq!(cart.total(), Money::from_rupees(500.0));

        let cart = reduce(
            Some(&cart),
            CartAction::Remove {
                menu_item_id: "m1".to_string(),
            },
        );
        assert!(cart.is_none());
    }

    #[test]
    fn test_total_consistent_after_every_add() {
        let items = [
            menu_item("m1", "v1", 149.6),
            menu_item("m2", "v1", 0.1),
            menu_item("m3", "v1", 0.2),
        ];
        let sequence = [0, 1, 2, 1, 0, 2, 2, 1];

        let mut cart: Option<Cart> = None;
        for &i in &sequence {
            cart = add(cart.as_ref(), &items[i], "v1");
            let current = cart.as_ref().unwrap();
            assert_eq!(current.total(), recomputed_total(current));
        }

        let cart = cart.unwrap();
        assert_eq!(cart.item_count(), sequence.len() as i64);
        assert_eq!(cart.line_count(), 3);
        // 2 × 149.60 + 3 × 0.10 + 3 × 0.20
        assert_eq!(cart.total().paise(), 29920 + 30 + 60);
    }

    #[test]
    fn test_add_new_item_appends_in_order() {
        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let cart = add(cart.as_ref(), &menu_item("m2", "v1", 70.0), "v1").unwrap();

        let ids: Vec<&str> = cart
            .items()
            .iter()
            .map(|line| line.menu_item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(cart.total(), Money::from_rupees(120.0));
    }

    #[test]
    fn test_switching_vendor_replaces_cart() {
        let cart = add(None, &menu_item("a1", "vA", 80.0), "vA");
        let cart = add(cart.as_ref(), &menu_item("a2", "vA", 90.0), "vA");
        let cart = add(cart.as_ref(), &menu_item("a2", "vA", 90.0), "vA");

        let b1 = menu_item("b1", "vB", 120.0);
        let cart = add(cart.as_ref(), &b1, "vB").unwrap();

        assert_eq!(cart.vendor_id(), "vB");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("b1"), 1);
        assert_eq!(cart.quantity_of("a1"), 0);
        assert_eq!(cart.quantity_of("a2"), 0);
        assert_eq!(cart.total(), Money::from_rupees(120.0));
    }

    #[test]
    fn test_readding_keeps_frozen_price() {
        let original = menu_item("m1", "v1", 100.0);
        let cart = add(None, &original, "v1");

        let repriced = menu_item("m1", "v1", 130.0);
        let cart = add(cart.as_ref(), &repriced, "v1").unwrap();

        let line = cart.line("m1").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Money::from_rupees(100.0));
        assert_eq!(line.menu_item.price, 100.0);
        assert_eq!(cart.total(), Money::from_rupees(200.0));
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let cart = add(cart.as_ref(), &menu_item("m2", "v1", 70.0), "v1");

        let cart = reduce(
            cart.as_ref(),
            CartAction::Remove {
                menu_item_id: "m1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total(), Money::from_rupees(70.0));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let after = reduce(
            cart.as_ref(),
            CartAction::Remove {
                menu_item_id: "nope".to_string(),
            },
        );
        assert_eq!(after, cart);

        let none = reduce(
            None,
            CartAction::Remove {
                menu_item_id: "m1".to_string(),
            },
        );
        assert!(none.is_none());
    }

    #[test]
    fn test_non_positive_quantity_behaves_as_remove() {
        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let cart = add(cart.as_ref(), &menu_item("m2", "v1", 70.0), "v1");

        let removed = reduce(
            cart.as_ref(),
            CartAction::Remove {
                menu_item_id: "m2".to_string(),
            },
        );
        for quantity in [0, -5] {
            let updated = reduce(
                cart.as_ref(),
                CartAction::UpdateQuantity {
                    menu_item_id: "m2".to_string(),
                    quantity,
                },
            );
            assert_eq!(updated, removed);
        }
    }

    #[test]
    fn test_update_quantity_noops() {
        assert!(reduce(
            None,
            CartAction::UpdateQuantity {
                menu_item_id: "m1".to_string(),
                quantity: 3,
            },
        )
        .is_none());

        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let after = reduce(
            cart.as_ref(),
            CartAction::UpdateQuantity {
                menu_item_id: "missing".to_string(),
                quantity: 3,
            },
        );
        assert_eq!(after, cart);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let item = menu_item("m1", "v1", 100.0);
        let cart = add(None, &item, "v1");

        let cart = reduce(
            cart.as_ref(),
            CartAction::UpdateQuantity {
                menu_item_id: "m1".into(),
                quantity: i64::MAX,
            },
        )
        .unwrap();
        assert_eq!(cart.total(), Money::from_paise(i64::MAX));

        let cart = add(Some(&cart), &item, "v1").unwrap();
        assert_eq!(cart.quantity_of("m1"), i64::MAX);

        let other = menu_item("m2", "v1", 50.0);
        let cart = add(Some(&cart), &other, "v1").unwrap();
        assert_eq!(cart.item_count(), i64::MAX);
        assert_eq!(cart.total(), Money::from_paise(i64::MAX));
    }

    #[test]
    fn test_clear() {
        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        assert!(reduce(cart.as_ref(), CartAction::Clear).is_none());
        assert!(reduce(None, CartAction::Clear).is_none());
    }

    #[test]
    fn test_item_count() {
        assert_eq!(item_count(None), 0);

        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let cart = add(cart.as_ref(), &menu_item("m1", "v1", 50.0), "v1");
        let cart = add(cart.as_ref(), &menu_item("m2", "v1", 70.0), "v1");
        assert_eq!(item_count(cart.as_ref()), 3);
    }

    #[test]
    fn test_to_order_items() {
        let cart = add(None, &menu_item("m1", "v1", 50.0), "v1");
        let cart = add(cart.as_ref(), &menu_item("m1", "v1", 50.0), "v1").unwrap();

        let items = cart.to_order_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].menu_item_id, "m1");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, Money::from_rupees(50.0));
    }

    #[test]
    fn test_action_decodes_from_json() {
        let action: CartAction = serde_json::from_str(
            r#"{ "type": "update_quantity", "menuItemId": "m1", "quantity": -1 }"#,
        )
        .unwrap();
        assert_eq!(
            action,
            CartAction::UpdateQuantity {
                menu_item_id: "m1".to_string(),
                quantity: -1,
            }
        );

        let action: CartAction = serde_json::from_str(r#"{ "type": "clear" }"#).unwrap();
        assert_eq!(action, CartAction::Clear);
    }

    #[test]
    fn test_cart_serializes_camel_case() {
        let cart = add(None, &menu_item("m1", "v1", 100.0), "v1").unwrap();
        let value = serde_json::to_value(&cart).unwrap();

        assert_eq!(value["vendorId"], "v1");
        assert_eq!(value["total"], serde_json::json!(100.0));
        assert_eq!(value["items"][0]["menuItemId"], "m1");
        assert_eq!(value["items"][0]["menuItem"]["vendorId"], "v1");
    }
}
