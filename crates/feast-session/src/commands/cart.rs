//! # Cart Commands
//!
//! Commands behind the menu card buttons and the cart view.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│ Invoice  │       │
//! │  │  Cart    │     │          │     │  View    │     │  View    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart        "+"                                │
//! │                   decrease_quantity  "−"                                │
//! │                   remove_from_cart   "Remove"                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use feast_core::{Cart, CartLineItem, CoreError, GroupedCartEntry, Money};

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::session::Session;

/// Totals row of the cart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Units in the cart (navbar badge).
    pub item_count: usize,
    /// Rows in the grouped view.
    pub distinct_items: usize,
    #[serde(with = "feast_core::money::decimal")]
    pub total_price: Money,
    /// `total_price` with the currency symbol, e.g. "₹21.48".
    pub display: String,
}

/// Cart response: grouped rows and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<GroupedCartEntry>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn build(cart: &Cart, config: &SessionConfig) -> Self {
        let items = cart.grouped_view();
        let total_price = cart.total_price();

        CartResponse {
            totals: CartTotals {
                item_count: cart.item_count(),
                distinct_items: items.len(),
                total_price,
                display: config.format_currency(total_price),
            },
            items,
        }
    }
}

fn respond(session: &Session) -> CartResponse {
    session
        .cart()
        .with_cart(|cart| CartResponse::build(cart, session.config()))
}

/// Gets the current cart contents, grouped.
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    respond(session)
}

/// Adds one unit of a menu item.
///
/// ## Behavior
/// - The record is looked up in the menu collection and its
///   `{id, name, price, image}` captured; later menu edits don't reach it
/// - Adding an item already in the cart appends another unit
///
/// ## Errors
/// - `NOT_FOUND`: no menu record with that id
/// - `VALIDATION_ERROR`: the item is switched off
pub fn add_to_cart(session: &Session, item_id: &str) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "add_to_cart command");

    let item = session.menu().get_item(item_id)?;

    if !item.is_available {
        return Err(CoreError::ItemUnavailable(item.id).into());
    }

    session.cart().add(CartLineItem::from(&item));
    Ok(respond(session))
}

/// Removes one unit ("−" button). An id not in the cart is a no-op.
pub fn decrease_quantity(session: &Session, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "decrease_quantity command");

    if !session.cart().remove_one(item_id) {
        debug!(item_id = %item_id, "decrease_quantity: item not in cart");
    }

    respond(session)
}

/// Removes every unit of an item ("Remove" button).
pub fn remove_from_cart(session: &Session, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "remove_from_cart command");

    let removed = session.cart().remove_all(item_id);
    debug!(item_id = %item_id, removed, "remove_from_cart done");

    respond(session)
}

/// Empties the cart.
pub fn clear_cart(session: &Session) -> CartResponse {
    debug!("clear_cart command");
    session.cart().clear();
    respond(session)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryMenu;
    use crate::error::ErrorCode;
    use crate::payment::MockGateway;
    use std::sync::Arc;

    const MENU_JSON: &str = r#"[
        {"id": "1", "name": "Pizza", "price": 9.99, "category": "Pizza",
         "image": "https://cdn.example.com/pizza.jpg", "isAvailable": true},
        {"id": "2", "name": "Soda", "price": 1.50, "category": "Drinks",
         "image": "https://cdn.example.com/soda.jpg", "isAvailable": true},
        {"id": "3", "name": "Biryani", "price": 12.00, "isAvailable": false,
         "image": "https://cdn.example.com/biryani.jpg"},
        {"id": "4", "name": "Kheer", "price": 3.25,
         "image": "https://cdn.example.com/kheer.jpg"}
    ]"#;

    fn session() -> Session {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();
        Session::new(
            SessionConfig::default(),
            Arc::new(menu),
            Arc::new(MockGateway::new()),
        )
    }

    #[test]
    fn test_add_groups_and_totals() {
        let session = session();
        add_to_cart(&session, "1").unwrap();
        add_to_cart(&session, "1").unwrap();
        let cart = add_to_cart(&session, "2").unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.totals.item_count, 3);
        assert_eq!(cart.totals.distinct_items, 2);
        assert_eq!(cart.totals.total_price.minor(), 2148);
        assert_eq!(cart.totals.display, "₹21.48");
    }

    #[test]
    fn test_add_unknown_item() {
        let session = session();
        let err = add_to_cart(&session, "999").unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_unavailable_item() {
        let session = session();
        let err = add_to_cart(&session, "3").unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_record_without_availability_flag_is_refused() {
        let session = session();
        let err = add_to_cart(&session, "4").unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_decrease_then_remove() {
        let session = session();
        add_to_cart(&session, "1").unwrap();
        add_to_cart(&session, "1").unwrap();
        add_to_cart(&session, "2").unwrap();

        let cart = decrease_quantity(&session, "1");
        assert_eq!(cart.totals.item_count, 2);
        assert_eq!(cart.totals.display, "₹11.49");

        let cart = remove_from_cart(&session, "2");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id, "1");
    }

    #[test]
    fn test_decrease_absent_is_noop() {
        let session = session();
        let cart = decrease_quantity(&session, "999");
        assert!(cart.items.is_empty());
        assert_eq!(cart.totals.display, "₹0.00");
    }

    #[test]
    fn test_clear_cart() {
        let session = session();
        add_to_cart(&session, "2").unwrap();

        let cart = clear_cart(&session);
        assert_eq!(cart.totals.item_count, 0);
        assert!(get_cart(&session).items.is_empty());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let session = session();
        add_to_cart(&session, "2").unwrap();

        let json = serde_json::to_value(get_cart(&session)).unwrap();
        assert_eq!(json["totals"]["itemCount"], 1);
        assert_eq!(json["totals"]["distinctItems"], 1);
        assert_eq!(json["items"][0]["price"], 1.5);
        assert_eq!(json["items"][0]["lineTotal"], 1.5);
        assert_eq!(json["totals"]["totalPrice"], 1.5);
    }

    #[test]
    fn test_menu_and_cart_prices_share_units() {
        let session = session();
        let pizza = session.menu().get_item("1").unwrap();
        add_to_cart(&session, "1").unwrap();
        add_to_cart(&session, "1").unwrap();

        let menu_json = serde_json::to_value(&pizza).unwrap();
        let cart_json = serde_json::to_value(get_cart(&session)).unwrap();
        let snapshot_json = serde_json::to_value(session.cart().snapshot()).unwrap();

        assert_eq!(menu_json["price"], 9.99);
        assert_eq!(cart_json["items"][0]["price"], menu_json["price"]);
        assert_eq!(cart_json["items"][0]["lineTotal"], 19.98);
        assert_eq!(cart_json["totals"]["totalPrice"], 19.98);
        assert_eq!(snapshot_json["items"][0]["price"], menu_json["price"]);
        assert_eq!(snapshot_json["totalPrice"], 19.98);
    }

    #[test]
    fn test_response_round_trips_to_same_minor_units() {
        let session = session();
        add_to_cart(&session, "1").unwrap();
        add_to_cart(&session, "2").unwrap();

        let response = get_cart(&session);
        let json = serde_json::to_string(&response).unwrap();
        let back: CartResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(back, response);
        assert_eq!(back.totals.total_price.minor(), 1149);
    }
}
