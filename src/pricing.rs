//! Pricing
//!
//! Order totals. Sums are taken in [`Money`] so currency mismatches and
//! overflow surface as errors instead of wrapping.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::items::LineItem,
    prices::{CURRENCY, Price, PriceError},
};

/// Orders with a subtotal at or above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(500_000);

/// Shipping fee for orders below [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING_FEE: Price = Price::new(15_000);

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A price could not be represented.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Subtotal, shipping and total of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of item prices
    pub subtotal: Price,

    /// Shipping fee
    pub shipping: Price,

    /// Subtotal plus shipping
    pub total: Price,
}

/// Calculates the total price of a list of items. An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic error.
/// - [`TotalPriceError::Price`]: A price does not fit the money representation.
pub fn total_price(items: &[LineItem]) -> Result<Money<'static, Currency>, TotalPriceError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, CURRENCY), |acc, item| {
            Ok(acc.add(item.price.to_money()?)?)
        })
}

/// Sum of item prices as a [`Price`].
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if the sum does not fit a price.
pub fn subtotal(items: &[LineItem]) -> Result<Price, TotalPriceError> {
    Ok(Price::try_from_money(&total_price(items)?)?)
}

/// Shipping fee for a subtotal.
pub fn shipping_for(subtotal: Price) -> Price {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Calculate subtotal, shipping and total for a list of items.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if summing the prices fails.
pub fn totals(items: &[LineItem]) -> Result<Totals, TotalPriceError> {
    let subtotal_money = total_price(items)?;
    let subtotal = Price::try_from_money(&subtotal_money)?;
    let shipping = shipping_for(subtotal);
    let total = Price::try_from_money(&subtotal_money.add(shipping.to_money()?)?)?;

    Ok(Totals {
        subtotal,
        shipping,
        total,
    })
}
