//! # Domain Types
//!
//! Records shared with the backend and the web UI.
//!
//! ## Type Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Vendor      │   │     Branch      │   │    MenuItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  vendor_id      │   │  id             │       │
//! │  │  name           │   │  location       │   │  vendor_id      │       │
//! │  │  cuisines       │   │  is_active      │   │  name, price    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Order      │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, role       │   │  items[]        │   │  rating 1..=5   │       │
//! │  │  email          │   │  status         │   │  comment        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  InventoryItem: per-branch stock of one MenuItem                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart depends only on `MenuItem`'s `id`, `name` and `price`; everything
//! else here is passthrough data for the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::currency::format_price_for_two;
use crate::location::Location;
use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// What a signed-in account is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Places orders.
    #[default]
    Customer,
    /// Manages a vendor's menu and branches.
    VendorOwner,
    /// Platform administrator.
    Admin,
}

/// An account on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Vendor & Branch
// =============================================================================

/// A restaurant or kitchen listed on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Cuisine tags shown on the vendor card ("North Indian", "Chinese").
    #[serde(default)]
    pub cuisines: Vec<String>,
    /// Average review rating, absent until the first review.
    pub rating: Option<f64>,
    /// Approximate cost for two, in rupees.
    pub cost_for_two: Option<f64>,
    pub image_url: Option<String>,
    pub is_open: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    /// Label for the vendor card, e.g. `₹300 for two`.
    pub fn cost_for_two_label(&self) -> Option<String> {
        self.cost_for_two.map(format_price_for_two)
    }
}

/// A physical outlet of a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub location: Location,
    pub phone: Option<String>,
    pub is_active: bool,
}

// =============================================================================
// Menu & Inventory
// =============================================================================

/// A dish on a vendor's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in rupees.
    pub price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_rupees(self.price)
    }
}

/// Stock of one menu item at one branch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub branch_id: String,
    pub menu_item_id: String,
    pub quantity_available: i64,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Checks if at least one unit is available.
    pub fn is_in_stock(&self) -> bool {
        self.quantity_available > 0
    }
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle of an order as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns true once the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// A line of a placed order.
/// Uses snapshot pattern: name and price are frozen when the order is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    #[ts(type = "number")]
    pub price: Money,
    pub quantity: i64,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        OrderItem {
            menu_item_id: line.menu_item_id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// An order as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub vendor_id: String,
    pub branch_id: Option<String>,
    pub items: Vec<OrderItem>,
    #[ts(type = "number")]
    pub total: Money,
    pub status: OrderStatus,
    pub delivery_location: Location,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Review
// =============================================================================

/// A customer's review of a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub vendor_id: String,
    pub order_id: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_decodes_backend_shape() {
        let json = r#"{
            "id": "m1",
            "vendorId": "v1",
            "name": "Paneer Tikka",
            "description": null,
            "price": 149.6,
            "category": "Starters",
            "imageUrl": null
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.vendor_id, "v1");
        assert_eq!(item.price().paise(), 14960);
        assert!(!item.is_veg);
        assert!(item.is_available);
    }

    #[test]
    fn test_vendor_cost_for_two_label() {
        let mut vendor = Vendor {
            id: "v1".to_string(),
            name: "Annapurna".to_string(),
            description: None,
            cuisines: vec!["South Indian".to_string()],
            rating: Some(4.3),
            cost_for_two: Some(300.0),
            image_url: None,
            is_open: true,
            created_at: Utc::now(),
        };
        assert_eq!(vendor.cost_for_two_label().as_deref(), Some("₹300 for two"));

        vendor.cost_for_two = None;
        assert_eq!(vendor.cost_for_two_label(), None);
    }

    #[test]
    fn test_order_status_terminal() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert!(!OrderStatus::OutForDelivery.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        let role: UserRole = serde_json::from_str("\"vendor_owner\"").unwrap();
        assert_eq!(role, UserRole::VendorOwner);
    }

    #[test]
    fn test_inventory_in_stock() {
        let mut item = InventoryItem {
            id: "i1".to_string(),
            branch_id: "b1".to_string(),
            menu_item_id: "m1".to_string(),
            quantity_available: 3,
            updated_at: Utc::now(),
        };
        assert!(item.is_in_stock());
        item.quantity_available = 0;
        assert!(!item.is_in_stock());
    }

    #[test]
    fn test_order_serializes_total_as_rupees() {
        let order = Order {
            id: "o1".to_string(),
            user_id: "u1".to_string(),
            vendor_id: "v1".to_string(),
            branch_id: None,
            items: vec![OrderItem {
                menu_item_id: "m1".to_string(),
                name: "Dal".to_string(),
                price: Money::from_rupees(120.5),
                quantity: 2,
            }],
            total: Money::from_rupees(241.0),
            status: OrderStatus::Confirmed,
            delivery_location: Location::new("1 Main St", "Pune", "Camp").unwrap(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["total"], serde_json::json!(241.0));
        assert_eq!(value["items"][0]["price"], serde_json::json!(120.5));
        assert_eq!(value["deliveryLocation"]["city"], "Pune");
    }
}
