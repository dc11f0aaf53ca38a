//! # Session Errors
//!
//! Error types for the session layer and the serializable error the views
//! receive.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Feast                                  │
//! │                                                                         │
//! │  View action                  Rust session                              │
//! │  ───────────                  ────────────                              │
//! │                                                                         │
//! │  commands::cart::add_to_cart(&session, "dal")                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Menu lookup failed? ─── CatalogError::NotFound ──────┐                 │
//! │  Item switched off?  ─── CoreError::ItemUnavailable ──┤                 │
//! │  Gateway declined?   ─── PaymentError::Declined ──────┼──► ApiError     │
//! │         │                                             │   {code, msg}  │
//! │         ▼                                             │                 │
//! │  Success ─────────────────────────────────────────────┘                 │
//! │                                                                         │
//! │  Cart mutations themselves never produce an error.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use feast_core::{CoreError, ValidationError};

// =============================================================================
// Catalog Error
// =============================================================================

/// Failures talking to the menu collection.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// Write attempted by a principal without the admin role.
    #[error("Menu changes require an admin")]
    Forbidden,

    /// The collection could not be reached.
    #[error("Menu source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid menu document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid menu item: {0}")]
    Validation(#[from] ValidationError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Payment Error
// =============================================================================

/// Failures reported by the payment gateway boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    /// The customer dismissed the hosted checkout.
    #[error("Payment cancelled")]
    Cancelled,

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from view commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Menu item not found: dal"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    /// Signed-in principal lacks the admin role.
    Forbidden,
    /// Nothing to check out.
    CheckoutError,
    PaymentError,
    /// Menu source or gateway could not be reached.
    Unavailable,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => ApiError::not_found("Menu item", &id),
            CatalogError::Forbidden => ApiError::forbidden("Menu changes require an admin"),
            CatalogError::Validation(e) => ApiError::validation(e.to_string()),
            CatalogError::Unavailable(reason) => {
                tracing::warn!(%reason, "menu source unavailable");
                ApiError::new(ErrorCode::Unavailable, "Menu is temporarily unavailable")
            }
            CatalogError::Parse(e) => {
                // Log the actual error but return a generic message
                tracing::error!("menu document parse failed: {}", e);
                ApiError::internal("Menu data is invalid")
            }
            CatalogError::Io(e) => {
                tracing::error!("menu read failed: {}", e);
                ApiError::internal("Menu could not be loaded")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::new(ErrorCode::CheckoutError, "No items to pay for"),
            CoreError::ItemUnavailable(id) => {
                ApiError::validation(format!("Menu item {} is not available", id))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Unavailable(ref reason) => {
                tracing::warn!(%reason, "payment gateway unavailable");
                ApiError::new(ErrorCode::Unavailable, err.to_string())
            }
            other => ApiError::new(ErrorCode::PaymentError, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serializes_code_and_message() {
        let err = ApiError::not_found("Menu item", "dal");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Menu item not found: dal");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::CheckoutError);
        assert_eq!(
            ApiError::from(CoreError::ItemUnavailable("x".into())).code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_catalog_errors_map_to_codes() {
        assert_eq!(
            ApiError::from(CatalogError::NotFound("x".into())).code,
            ErrorCode::NotFound
        );
        assert_eq!(
            ApiError::from(CatalogError::Unavailable("offline".into())).code,
            ErrorCode::Unavailable
        );
        assert_eq!(
            ApiError::from(CatalogError::Forbidden).code,
            ErrorCode::Forbidden
        );
    }

    #[test]
    fn test_payment_errors_map_to_codes() {
        let err = ApiError::from(PaymentError::Declined("insufficient funds".into()));
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Payment declined: insufficient funds");
    }
}
