//! # Error Types
//!
//! Domain-specific error types for feast-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  feast-core errors (this file)                                         │
//! │  ├── CoreError        - Checkout / ordering rule violations            │
//! │  └── ValidationError  - Menu form input failures                       │
//! │                                                                         │
//! │  feast-session errors                                                  │
//! │  ├── CatalogError     - Menu source failures                           │
//! │  ├── PaymentError     - Gateway failures                               │
//! │  ├── ConfigError      - Config load failures                           │
//! │  └── ApiError         - What the views see (serialized)                │
//! │                                                                         │
//! │  The cart itself has NO error type: every cart operation is total.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ordering rule violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Checkout or invoice requested for a cart with no items.
    ///
    /// The payment and invoice views show "No items to pay for" instead of
    /// an order summary.
    #[error("Cart is empty")]
    EmptyCart,

    /// The admin toggled the item off; it cannot be added to a cart.
    #[error("Menu item {0} is not available")]
    ItemUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for menu records edited in the admin view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., a relative image URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
