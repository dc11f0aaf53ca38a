//! # Checkout
//!
//! Pure derivations for the payment and invoice views.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────────┐     ┌──────────┐     ┌──────────┐   │
//! │  │   Cart   │────►│ OrderSummary │────►│ Gateway  │────►│ Invoice  │   │
//! │  │ (items)  │     │  ORD-0042    │     │  charge  │     │ INV-0815 │   │
//! │  └──────────┘     └──────────────┘     └────┬─────┘     └──────────┘   │
//! │                                              │                ▲         │
//! │                                              ▼                │         │
//! │                                       PaymentRecord ──────────┘         │
//! │                                       (session-scoped)                  │
//! │                                                                         │
//! │  The cart knows nothing about payment state. Paying does not clear it. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! `subtotal = cart.total_price()`, `tax = subtotal × rate`,
//! `total = subtotal + delivery_fee + tax`. With no fee and a zero rate the
//! charge equals the cart total exactly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::{self, Money};
use crate::types::{GroupedCartEntry, TaxRate};

/// Base of the third-party QR image service used for payment verification.
pub const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

// =============================================================================
// Reference Numbers
// =============================================================================

/// Formats a display reference such as `ORD-0042`.
///
/// ```rust
/// use feast_core::checkout::format_reference;
///
/// assert_eq!(format_reference("ORD", 42), "ORD-0042");
/// assert_eq!(format_reference("INV", 12345), "INV-2345");
/// ```
pub fn format_reference(prefix: &str, number: u32) -> String {
    format!("{}-{:04}", prefix, number % 10_000)
}

fn random_reference(prefix: &str) -> String {
    let number = (Uuid::new_v4().as_u128() % 10_000) as u32;
    format_reference(prefix, number)
}

/// A fresh random order number (`ORD-NNNN`).
pub fn new_order_number() -> String {
    random_reference("ORD")
}

/// A fresh random invoice number (`INV-NNNN`).
pub fn new_invoice_number() -> String {
    random_reference("INV")
}

// =============================================================================
// Order Summary
// =============================================================================

/// What the payment view shows before the customer pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub order_number: String,
    /// Units in the cart, as in "Items (3)".
    pub item_count: usize,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub delivery_fee: Money,
    pub tax_rate: TaxRate,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub tax: Money,
    /// Amount charged through the payment gateway.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total: Money,
}

impl OrderSummary {
    /// Summarises a non-empty cart.
    ///
    /// ## Errors
    /// `CoreError::EmptyCart` when there is nothing to pay for.
    pub fn from_cart(
        cart: &Cart,
        order_number: impl Into<String>,
        delivery_fee: Money,
        tax_rate: TaxRate,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let subtotal = cart.total_price();
        let tax = subtotal.calculate_tax(tax_rate);

        Ok(OrderSummary {
            order_number: order_number.into(),
            item_count: cart.item_count(),
            subtotal,
            delivery_fee,
            tax_rate,
            tax,
            total: subtotal + delivery_fee + tax,
        })
    }
}

// =============================================================================
// Payment Record
// =============================================================================

/// A successful gateway charge, kept for the rest of the session so the
/// invoice can show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRecord {
    /// Identifier returned by the gateway (e.g. `pay_x8k2...`).
    pub payment_id: String,
    pub order_number: String,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub amount: Money,
    /// ISO 4217 code the charge was made in.
    pub currency: String,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Link to a QR image encoding the payment id.
    pub fn verification_qr_url(&self) -> String {
        verification_qr_url(&self.payment_id)
    }
}

/// Builds the QR image URL for a payment id.
///
/// ```rust
/// use feast_core::checkout::verification_qr_url;
///
/// assert_eq!(
///     verification_qr_url("pay_abc123"),
///     "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=pay_abc123"
/// );
/// ```
pub fn verification_qr_url(payment_id: &str) -> String {
    let data: String = url::form_urlencoded::byte_serialize(payment_id.as_bytes()).collect();
    format!("{}?size=200x200&data={}", QR_SERVICE_URL, data)
}

// =============================================================================
// Invoice
// =============================================================================

/// The printable invoice: grouped lines, totals and the payment, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub invoice_number: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub lines: Vec<GroupedCartEntry>,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub delivery_fee: Money,
    pub tax_rate: TaxRate,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub tax: Money,
    /// Same amount the order summary charged.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total: Money,
    pub payment: Option<PaymentRecord>,
}

impl Invoice {
    /// Builds an invoice from the cart's grouped view.
    ///
    /// ## Errors
    /// `CoreError::EmptyCart`: the invoice view shows "No items to invoice".
    pub fn build(
        cart: &Cart,
        invoice_number: impl Into<String>,
        date: NaiveDate,
        delivery_fee: Money,
        tax_rate: TaxRate,
        payment: Option<PaymentRecord>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let subtotal = cart.total_price();
        let tax = subtotal.calculate_tax(tax_rate);

        Ok(Invoice {
            invoice_number: invoice_number.into(),
            date,
            lines: cart.grouped_view(),
            subtotal,
            delivery_fee,
            tax_rate,
            tax,
            total: subtotal + delivery_fee + tax,
            payment,
        })
    }

    /// Invoice date as `DD/MM/YYYY`.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn is_paid(&self) -> bool {
        self.payment.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CartLineItem;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartLineItem::new("1", "Pizza", Money::from_minor(999)));
        cart.add(CartLineItem::new("1", "Pizza", Money::from_minor(999)));
        cart.add(CartLineItem::new("2", "Soda", Money::from_minor(150)));
        cart
    }

    fn payment() -> PaymentRecord {
        PaymentRecord {
            payment_id: "pay_abc".to_string(),
            order_number: "ORD-0001".to_string(),
            amount: Money::from_minor(2148),
            currency: "INR".to_string(),
            paid_at: Utc::now(),
        }
    }

    #[test]
    fn test_reference_numbers_have_four_digits() {
        let order = new_order_number();
        assert!(order.starts_with("ORD-"));
        assert_eq!(order.len(), 8);
        assert!(order[4..].chars().all(|c| c.is_ascii_digit()));

        assert!(new_invoice_number().starts_with("INV-"));
    }

    #[test]
    fn test_summary_total_equals_cart_total_without_fees() {
        let cart = cart();
        let summary =
            OrderSummary::from_cart(&cart, "ORD-0001", Money::zero(), TaxRate::zero()).unwrap();

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, cart.total_price());
        assert_eq!(summary.total, cart.total_price());
        assert!(summary.tax.is_zero());
    }

    #[test]
    fn test_summary_adds_fee_and_tax() {
        let summary = OrderSummary::from_cart(
            &cart(),
            "ORD-0002",
            Money::from_minor(4000),
            TaxRate::from_bps(500),
        )
        .unwrap();

        // 21.48 × 5% = 1.074 → 1.07
        assert_eq!(summary.tax.minor(), 107);
        assert_eq!(summary.total.minor(), 2148 + 4000 + 107);
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let empty = Cart::new();
        assert_eq!(
            OrderSummary::from_cart(&empty, "ORD-0003", Money::zero(), TaxRate::zero()),
            Err(CoreError::EmptyCart)
        );
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            Invoice::build(&empty, "INV-0001", date, Money::zero(), TaxRate::zero(), None),
            Err(CoreError::EmptyCart)
        );
    }

    #[test]
    fn test_invoice_uses_grouped_lines() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let invoice = Invoice::build(
            &cart(),
            "INV-0815",
            date,
            Money::zero(),
            TaxRate::zero(),
            Some(payment()),
        )
        .unwrap();

        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.lines[0].quantity, 2);
        assert_eq!(invoice.lines[0].line_total.minor(), 1998);
        assert_eq!(invoice.total.to_string(), "21.48");
        assert_eq!(invoice.formatted_date(), "07/03/2026");
        assert!(invoice.is_paid());
    }

    #[test]
    fn test_invoice_total_matches_summary_total() {
        let fee = Money::from_minor(4000);
        let rate = TaxRate::from_bps(500);
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let summary = OrderSummary::from_cart(&cart(), "ORD-0004", fee, rate).unwrap();
        let invoice = Invoice::build(&cart(), "INV-0004", date, fee, rate, None).unwrap();

        assert_eq!(invoice.delivery_fee, fee);
        assert_eq!(invoice.tax, summary.tax);
        assert_eq!(invoice.total, summary.total);
    }

    #[test]
    fn test_qr_url_escapes_payment_id() {
        assert_eq!(
            verification_qr_url("pay a&b"),
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=pay+a%26b"
        );
        assert!(payment().verification_qr_url().ends_with("data=pay_abc"));
    }
}
