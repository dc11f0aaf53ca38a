//! # feast-session: Session Wiring for Feast
//!
//! Composes one ordering session for the web views: the shared observable
//! cart, the menu collection, the payment gateway and the configuration.
//!
//! ## Module Organization
//! ```text
//! feast_session/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── session.rs      ◄─── Composition root
//! ├── store.rs        ◄─── Observable, shared CartStore
//! ├── catalog.rs      ◄─── MenuSource trait, InMemoryMenu
//! ├── payment.rs      ◄─── PaymentGateway trait, MockGateway
//! ├── config.rs       ◄─── SessionConfig (defaults → TOML → env)
//! ├── telemetry.rs    ◄─── tracing subscriber setup
//! ├── error.rs        ◄─── Session errors, ApiError for views
//! └── commands/
//!     ├── cart.rs     ◄─── Cart view actions
//!     ├── menu.rs     ◄─── Menu browsing, admin edits
//!     └── checkout.rs ◄─── Order summary, pay, invoice
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use feast_session::catalog::InMemoryMenu;
//! use feast_session::commands;
//! use feast_session::config::SessionConfig;
//! use feast_session::payment::MockGateway;
//! use feast_session::Session;
//!
//! let menu = InMemoryMenu::from_json_str(
//!     r#"[{"id": "1", "name": "Pizza", "price": 9.99, "isAvailable": true}]"#,
//! ).unwrap();
//! let session = Session::new(SessionConfig::default(), Arc::new(menu), Arc::new(MockGateway::new()));
//!
//! // The navbar badge holds its own handle to the same cart
//! let badge = session.cart().clone();
//!
//! commands::cart::add_to_cart(&session, "1").unwrap();
//! assert_eq!(badge.item_count(), 1);
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod payment;
pub mod session;
pub mod store;
pub mod telemetry;

pub use error::{ApiError, ErrorCode};
pub use session::Session;
pub use store::{CartSnapshot, CartStore, SubscriptionId};
