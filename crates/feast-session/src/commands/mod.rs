//! # Commands Module
//!
//! One function per view action. Each takes the `Session` and returns
//! either a serializable response or an `ApiError { code, message }`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Add, decrease, remove, clear, get
//! ├── menu.rs      ◄─── Browse, categories, admin edits
//! └── checkout.rs  ◄─── Order summary, pay, invoice
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Menu view "Add" button                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&session, "1")                             │
//! │         │                                                               │
//! │         ├──► session.menu().get_item("1")    (snapshot the record)      │
//! │         ├──► session.cart().add(line_item)   (observers notified)       │
//! │         ▼                                                               │
//! │  Ok(CartResponse { items: [...grouped], totals: {...} })               │
//! │  Err(ApiError { code: "NOT_FOUND", message: "..." })                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod menu;

pub use cart::{CartResponse, CartTotals};
pub use checkout::InvoiceResponse;
