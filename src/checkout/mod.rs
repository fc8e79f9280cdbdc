//! Checkout
//!
//! Validation of checkout input and the order it produces. Validation stops
//! at the first failure, in this order: empty cart, missing address, missing
//! or unknown payment method.

use thiserror::Error;

use crate::cart::items::LineItem;

pub mod order;
pub mod payment;

pub use order::{ORDER_PREFIX, Order, OrderNumber, OrderNumbers};
pub use payment::PaymentMethod;

/// Reasons a checkout is rejected. The ledger is never changed by a rejection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to check out
    #[error("your cart is empty")]
    EmptyCart,

    /// Address missing or blank
    #[error("please enter a shipping address")]
    MissingAddress,

    /// No payment method selected
    #[error("please choose a payment method")]
    MissingPaymentMethod,

    /// Payment method outside the offered set
    #[error("unknown payment method: {0:?}")]
    UnknownPaymentMethod(String),
}

/// Checkout input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout<'a> {
    /// Trimmed shipping address
    pub address: &'a str,

    /// Selected payment method
    pub payment: PaymentMethod,
}

/// Validate checkout input against the current cart.
///
/// A blank `payment` value counts as no selection.
///
/// # Errors
///
/// Returns the first [`CheckoutError`] that applies.
pub fn validate<'a>(
    items: &[LineItem],
    address: &'a str,
    payment: Option<&str>,
) -> Result<ValidCheckout<'a>, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let address = address.trim();
    if address.is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    let payment = payment
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(CheckoutError::MissingPaymentMethod)?
        .parse()?;

    Ok(ValidCheckout { address, payment })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::prices::Price;

    use super::*;

    fn items() -> Vec<LineItem> {
        vec![LineItem::new("Blush Charm", Price::new(349_000))]
    }

    #[test]
    fn empty_cart_is_checked_first() {
        assert_eq!(validate(&[], "", None), Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn blank_address_is_rejected() {
        assert_eq!(
            validate(&items(), "  \n\t", Some("cod")),
            Err(CheckoutError::MissingAddress)
        );
    }

    #[test]
    fn missing_or_blank_payment_is_rejected() {
        assert_eq!(
            validate(&items(), "Jl. Melati 1", None),
            Err(CheckoutError::MissingPaymentMethod)
        );
        assert_eq!(
            validate(&items(), "Jl. Melati 1", Some(" ")),
            Err(CheckoutError::MissingPaymentMethod)
        );
    }

    #[test]
    fn unknown_payment_is_rejected() {
        assert_eq!(
            validate(&items(), "Jl. Melati 1", Some("cheque")),
            Err(CheckoutError::UnknownPaymentMethod("cheque".to_string()))
        );
    }

    #[test]
    fn valid_input_is_trimmed() -> TestResult {
        let valid = validate(&items(), "  Jl. Melati 1, Bandung  ", Some("e-wallet"))?;

        assert_eq!(valid.address, "Jl. Melati 1, Bandung");
        assert_eq!(valid.payment, PaymentMethod::EWallet);

        Ok(())
    }
}
