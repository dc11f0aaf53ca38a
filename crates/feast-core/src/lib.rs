//! # feast-core: Pure Business Logic for Feast
//!
//! This crate holds the ordering logic of the Feast food-ordering app as
//! pure functions and plain data, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Feast Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web views                                    │   │
//! │  │   Menu ──► Cart ──► Payment ──► Invoice      Navbar badge       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        feast-session (CartStore, commands, config, gateway)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ feast-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ checkout │ │  menu   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PLAIN DATA                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, CartLineItem, GroupedCartEntry, Principal)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart: quantity by repetition, grouping, totals
//! - [`menu`] - Category tabs and search filtering
//! - [`checkout`] - Order summary, payment record, invoice
//! - [`validation`] - Admin menu form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use feast_core::{Cart, CartLineItem, Money};
//!
//! let mut cart = Cart::new();
//! cart.add(CartLineItem::new("1", "Pizza", Money::from_decimal(9.99)));
//! cart.add(CartLineItem::new("1", "Pizza", Money::from_decimal(9.99)));
//! cart.add(CartLineItem::new("2", "Soda", Money::from_decimal(1.50)));
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.grouped_view()[0].quantity, 2);
//! assert_eq!(cart.total_price().to_string(), "21.48");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod menu;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use checkout::{Invoice, OrderSummary, PaymentRecord};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
