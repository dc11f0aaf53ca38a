//! # Payment Gateway
//!
//! Boundary to the hosted checkout that charges the customer.
//!
//! ## Charge Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Flow                                         │
//! │                                                                         │
//! │  Payment view                                                           │
//! │       │  "Pay ₹21.48"                                                   │
//! │       ▼                                                                 │
//! │  OrderSummary::from_cart()  ──► total in minor units                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ChargeRequest { order_number, amount, currency, description }          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PaymentGateway::charge() ──► Ok("pay_x8k2m4q9w1e7r")                   │
//! │       │                   └─► Err(Declined | Cancelled | ...)           │
//! │       ▼                                                                 │
//! │  PaymentRecord stored on the Session (cart untouched)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use feast_core::Money;

use crate::error::PaymentError;

/// Prefix of every gateway payment id.
pub const PAYMENT_ID_PREFIX: &str = "pay_";

const MOCK_ID_LEN: usize = 13;

/// What the gateway is asked to charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub order_number: String,
    /// Amount in minor units (paise for INR).
    pub amount: Money,
    /// ISO 4217 code.
    pub currency: String,
    /// Shown on the hosted checkout, e.g. "Food Order #ORD-0042".
    pub description: String,
}

impl ChargeRequest {
    pub fn new(order_number: impl Into<String>, amount: Money, currency: impl Into<String>) -> Self {
        let order_number = order_number.into();
        ChargeRequest {
            description: format!("Food Order #{}", order_number),
            order_number,
            amount,
            currency: currency.into(),
        }
    }
}

/// A payment processor able to charge a customer.
pub trait PaymentGateway: Send + Sync {
    /// Charges the request. Returns the gateway's payment id.
    fn charge(&self, request: &ChargeRequest) -> Result<String, PaymentError>;
}

// =============================================================================
// Mock Gateway
// =============================================================================

/// Test-mode gateway: approves every valid charge with a random id.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    decline_reason: Option<String>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that declines every charge.
    pub fn declining(reason: impl Into<String>) -> Self {
        MockGateway {
            decline_reason: Some(reason.into()),
        }
    }
}

/// `pay_` followed by 13 lowercase hex characters.
fn mock_payment_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{}{}", PAYMENT_ID_PREFIX, &simple[..MOCK_ID_LEN])
}

impl PaymentGateway for MockGateway {
    fn charge(&self, request: &ChargeRequest) -> Result<String, PaymentError> {
        debug!(
            order = %request.order_number,
            amount = request.amount.minor(),
            currency = %request.currency,
            "mock gateway charge"
        );

        if request.amount.is_negative() || request.amount.is_zero() {
            return Err(PaymentError::InvalidAmount(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }

        if let Some(reason) = &self.decline_reason {
            return Err(PaymentError::Declined(reason.clone()));
        }

        let payment_id = mock_payment_id();
        info!(payment_id = %payment_id, order = %request.order_number, "Payment approved");
        Ok(payment_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request(minor: i64) -> ChargeRequest {
        ChargeRequest::new("ORD-0042", Money::from_minor(minor), "INR")
    }

    #[test]
    fn test_charge_request_description() {
        assert_eq!(request(2148).description, "Food Order #ORD-0042");
    }

    #[test]
    fn test_mock_gateway_approves() {
        let id = MockGateway::new().charge(&request(2148)).unwrap();

        assert!(id.starts_with("pay_"));
        assert_eq!(id.len(), 4 + 13);
        assert!(id[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_mock_ids_are_unique() {
        let gateway = MockGateway::new();
        let a = gateway.charge(&request(100)).unwrap();
        let b = gateway.charge(&request(100)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let gateway = MockGateway::new();
        assert!(matches!(
            gateway.charge(&request(0)),
            Err(PaymentError::InvalidAmount(_))
        ));
        assert!(matches!(
            gateway.charge(&request(-5)),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_declining_gateway() {
        let gateway = MockGateway::declining("card expired");
        assert_eq!(
            gateway.charge(&request(2148)),
            Err(PaymentError::Declined("card expired".into()))
        );
    }
}
