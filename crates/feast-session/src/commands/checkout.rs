//! # Checkout Commands
//!
//! Payment and invoice views.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  order_summary ──► OrderSummary { ORD-0042, Items (3), total }          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pay ──► PaymentGateway::charge(total) ──► PaymentRecord on Session     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  invoice ──► Invoice { INV-1234, DD/MM/YYYY, lines, total, payment }    │
//! │                                                                         │
//! │  The cart is NOT cleared by paying; the invoice reads the same cart.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{debug, info};

use feast_core::checkout::{new_invoice_number, new_order_number};
use feast_core::{CoreError, Invoice, OrderSummary, PaymentRecord};

use crate::error::{ApiError, ErrorCode};
use crate::payment::ChargeRequest;
use crate::session::Session;

/// What the payment view shows before the customer pays.
pub fn order_summary(session: &Session) -> Result<OrderSummary, ApiError> {
    debug!("order_summary command");

    let checkout = &session.config().checkout;
    let summary = session.cart().with_cart(|cart| {
        OrderSummary::from_cart(
            cart,
            new_order_number(),
            checkout.delivery_fee(),
            checkout.tax_rate(),
        )
    })?;

    Ok(summary)
}

/// Charges the cart total through the gateway and remembers the payment.
///
/// ## Errors
/// - `CHECKOUT_ERROR`: the cart is empty
/// - `PAYMENT_ERROR`: the gateway declined or the customer cancelled
pub fn pay(session: &Session) -> Result<PaymentRecord, ApiError> {
    debug!("pay command");

    let summary = order_summary(session)?;
    let currency = session.config().currency.code.clone();
    let request = ChargeRequest::new(&summary.order_number, summary.total, &currency);

    let payment_id = session.gateway().charge(&request)?;

    let record = PaymentRecord {
        payment_id,
        order_number: summary.order_number,
        amount: summary.total,
        currency,
        paid_at: Utc::now(),
    };

    info!(
        payment_id = %record.payment_id,
        total = %session.config().format_currency(record.amount),
        "Order paid"
    );
    session.record_payment(record.clone());

    Ok(record)
}

/// The invoice view: store header, grouped lines, totals, payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub store_name: String,
    pub store_address: Vec<String>,
    pub contact_email: Option<String>,
    pub invoice: Invoice,
    /// `DD/MM/YYYY`.
    pub date: String,
    pub total_display: String,
    /// QR image encoding the payment id; `None` until paid.
    pub verification_qr_url: Option<String>,
}

/// Builds the invoice for the current cart, dated today.
///
/// ## Errors
/// `CHECKOUT_ERROR` "No items to invoice" for an empty cart.
pub fn invoice(session: &Session) -> Result<InvoiceResponse, ApiError> {
    debug!("invoice command");

    let config = session.config();
    let payment = session.last_payment();
    let today = Local::now().date_naive();

    let invoice = session
        .cart()
        .with_cart(|cart| {
            Invoice::build(
                cart,
                new_invoice_number(),
                today,
                config.checkout.delivery_fee(),
                config.checkout.tax_rate(),
                payment,
            )
        })
        .map_err(|e| match e {
            CoreError::EmptyCart => ApiError::new(ErrorCode::CheckoutError, "No items to invoice"),
            other => other.into(),
        })?;

    Ok(InvoiceResponse {
        store_name: config.store.name.clone(),
        store_address: config.store.address.clone(),
        contact_email: config.store.contact_email.clone(),
        date: invoice.formatted_date(),
        total_display: config.format_currency(invoice.total),
        verification_qr_url: invoice.payment.as_ref().map(PaymentRecord::verification_qr_url),
        invoice,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryMenu;
    use crate::commands::cart::add_to_cart;
    use crate::config::SessionConfig;
    use crate::payment::MockGateway;
    use std::sync::Arc;

    const MENU_JSON: &str = r#"[
        {"id": "1", "name": "Pizza", "price": 9.99, "isAvailable": true,
         "image": "https://cdn.example.com/pizza.jpg"},
        {"id": "2", "name": "Soda", "price": 1.50, "isAvailable": true,
         "image": "https://cdn.example.com/soda.jpg"}
    ]"#;

    fn session_with(config: SessionConfig, gateway: MockGateway) -> Session {
        let menu = InMemoryMenu::from_json_str(MENU_JSON).unwrap();
        Session::new(config, Arc::new(menu), Arc::new(gateway))
    }

    fn stocked(session: &Session) {
        add_to_cart(session, "1").unwrap();
        add_to_cart(session, "1").unwrap();
        add_to_cart(session, "2").unwrap();
    }

    #[test]
    fn test_summary_equals_cart_total_by_default() {
        let session = session_with(SessionConfig::default(), MockGateway::new());
        stocked(&session);

        let summary = order_summary(&session).unwrap();
        assert!(summary.order_number.starts_with("ORD-"));
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, session.cart().total_price());
    }

    #[test]
    fn test_summary_with_fee_and_tax() {
        let mut config = SessionConfig::default();
        config.checkout.tax_rate_bps = 500;
        config.checkout.delivery_fee_minor = 4000;
        let session = session_with(config, MockGateway::new());
        stocked(&session);

        let summary = order_summary(&session).unwrap();
        assert_eq!(summary.subtotal.minor(), 2148);
        assert_eq!(summary.tax.minor(), 107);
        assert_eq!(summary.total.minor(), 2148 + 4000 + 107);
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let session = session_with(SessionConfig::default(), MockGateway::new());

        assert_eq!(order_summary(&session).unwrap_err().code, ErrorCode::CheckoutError);
        assert_eq!(pay(&session).unwrap_err().code, ErrorCode::CheckoutError);

        let err = invoice(&session).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(err.message, "No items to invoice");
    }

    #[test]
    fn test_pay_records_payment_and_keeps_cart() {
        let session = session_with(SessionConfig::default(), MockGateway::new());
        stocked(&session);

        let record = pay(&session).unwrap();

        assert!(record.payment_id.starts_with("pay_"));
        assert_eq!(record.amount.minor(), 2148);
        assert_eq!(record.currency, "INR");
        assert_eq!(session.last_payment(), Some(record));
        assert_eq!(session.cart().item_count(), 3);
    }

    #[test]
    fn test_declined_payment() {
        let session = session_with(SessionConfig::default(), MockGateway::declining("card expired"));
        stocked(&session);

        let err = pay(&session).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(session.last_payment().is_none());
    }

    #[test]
    fn test_invoice_total_equals_amount_charged() {
        let mut config = SessionConfig::default();
        config.checkout.delivery_fee_minor = 4000;
        config.checkout.tax_rate_bps = 500;
        let session = session_with(config, MockGateway::new());
        add_to_cart(&session, "1").unwrap();

        let paid = pay(&session).unwrap();
        let billed = invoice(&session).unwrap();

        assert_eq!(paid.amount.minor(), 999 + 4000 + 50);
        assert_eq!(billed.invoice.delivery_fee.minor(), 4000);
        assert_eq!(billed.invoice.total, paid.amount);
        assert_eq!(billed.total_display, "₹50.49");
    }

    #[test]
    fn test_invoice_before_and_after_payment() {
        let session = session_with(SessionConfig::default(), MockGateway::new());
        stocked(&session);

        let unpaid = invoice(&session).unwrap();
        assert!(unpaid.invoice.invoice_number.starts_with("INV-"));
        assert!(unpaid.verification_qr_url.is_none());
        assert_eq!(unpaid.invoice.lines.len(), 2);
        assert_eq!(unpaid.invoice.total, session.cart().total_price());
        assert_eq!(unpaid.total_display, "₹21.48");
        assert_eq!(unpaid.date.len(), "DD/MM/YYYY".len());

        let record = pay(&session).unwrap();
        let paid = invoice(&session).unwrap();
        assert!(paid.invoice.is_paid());
        let qr = paid.verification_qr_url.unwrap();
        assert!(qr.ends_with(&format!("data={}", record.payment_id)));
    }
}
