//! # Domain Types
//!
//! Core domain types shared by the menu, cart, checkout and admin views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add()   ┌─────────────────┐                      │
//! │  │    MenuItem     │ ────────► │  CartLineItem   │  one unit, frozen   │
//! │  │  ─────────────  │ snapshot  │  ─────────────  │                      │
//! │  │  id (doc id)    │           │  id (not unique)│                      │
//! │  │  name, price    │           │  name, price    │                      │
//! │  │  category       │           │  image          │                      │
//! │  │  image, flags   │           └────────┬────────┘                      │
//! │  └─────────────────┘                    │ grouped_view()               │
//! │                                         ▼                               │
//! │                                ┌─────────────────┐                      │
//! │                                │GroupedCartEntry │  derived, read-only │
//! │                                │  quantity       │                      │
//! │                                │  line_total     │                      │
//! │                                └─────────────────┘                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Principal    │   │      Role       │                              │
//! │  │  uid, email     │   │  Admin          │                              │
//! │  │  role           │   │  Customer       │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%. 500 bps = 5% GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A menu record as stored in the remote `menu` document collection.
///
/// ## Wire Format
/// ```json
/// {
///   "id": "margherita",
///   "name": "Margherita Pizza",
///   "price": 249.0,
///   "category": "Pizza",
///   "image": "https://cdn.example.com/margherita.jpg",
///   "isAvailable": true,
///   "isNew": false,
///   "isPopular": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    /// Document id in the menu collection.
    pub id: String,

    pub name: String,

    /// Unit price. Stored upstream as a decimal number.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Display category. Records without one are shown as "Main Dish".
    #[serde(default = "default_category")]
    pub category: String,

    /// Image URL resolved by the image CDN.
    #[serde(default)]
    pub image: Option<String>,

    /// Admin-controlled availability toggle. Records without the flag are
    /// treated as unavailable, as the admin view shows them.
    #[serde(default)]
    pub is_available: bool,

    #[serde(default)]
    pub is_new: bool,

    #[serde(default)]
    pub is_popular: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Category shown for menu records that carry none.
pub const DEFAULT_CATEGORY: &str = "Main Dish";

// =============================================================================
// Cart Line Item
// =============================================================================

/// One unit of a menu item in the cart.
///
/// ## Design Notes
/// - `id` is the menu item's id and is NOT unique within a cart: adding the
///   same item twice appends two line items sharing the id
/// - `name`, `price`, `image` are frozen at add time. If the menu price
///   changes upstream, this line item keeps the captured price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub image: Option<String>,
}

impl CartLineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        CartLineItem {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Snapshots the `{id, name, price, image}` subset of a menu record.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        CartLineItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

impl From<&MenuItem> for CartLineItem {
    fn from(item: &MenuItem) -> Self {
        CartLineItem::from_menu_item(item)
    }
}

// =============================================================================
// Grouped Cart Entry
// =============================================================================

/// One row of the grouped cart view: a distinct id and its unit count.
///
/// Derived from the cart on demand. Never stored, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GroupedCartEntry {
    pub id: String,
    pub name: String,
    /// Unit price taken from the first matching line item.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub image: Option<String>,
    pub quantity: u32,
    /// `price * quantity`.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub line_total: Money,
}

// =============================================================================
// Identity
// =============================================================================

/// Role attached to a signed-in principal by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    /// May edit the menu collection.
    Admin,
    /// End user: browses, orders, pays.
    #[default]
    Customer,
}

impl Role {
    pub fn can_edit_menu(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Principal {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.can_edit_menu()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_menu_item_from_document() {
        let json = r#"{
            "id": "margherita",
            "name": "Margherita Pizza",
            "price": 9.99,
            "category": "Pizza",
            "image": "https://cdn.example.com/m.jpg",
            "isAvailable": true,
            "isNew": true,
            "isPopular": false
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price.minor(), 999);
        assert!(item.is_new);
        assert!(!item.is_popular);
    }

    #[test]
    fn test_menu_item_defaults() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id": "x", "name": "Dal", "price": 120}"#).unwrap();
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.image, None);
        assert!(!item.is_available);
        assert!(!item.is_new);
    }

    #[test]
    fn test_line_item_snapshot_copies_display_fields() {
        let item = MenuItem {
            id: "1".to_string(),
            name: "Pizza".to_string(),
            price: Money::from_minor(999),
            category: "Pizza".to_string(),
            image: Some("pizza.jpg".to_string()),
            is_available: true,
            is_new: false,
            is_popular: true,
        };

        let line = CartLineItem::from(&item);
        assert_eq!(line.id, "1");
        assert_eq!(line.price.minor(), 999);
        assert_eq!(line.image.as_deref(), Some("pizza.jpg"));
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let principal: Principal =
            serde_json::from_str(r#"{"uid": "u1", "email": "a@b.c", "displayName": null}"#)
                .unwrap();
        assert_eq!(principal.role, Role::Customer);
        assert!(!principal.is_admin());
        assert!(Role::Admin.can_edit_menu());
    }
}
