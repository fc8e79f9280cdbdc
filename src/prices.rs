//! Prices

use std::{fmt, ops::Deref};

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency every price in the store is denominated in.
pub static CURRENCY: &Currency = iso::IDR;

/// Errors converting between [`Price`] and [`Money`].
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount is negative, fractional or too large for a whole-Rupiah price.
    #[error("{0} is not a whole, non-negative Rupiah amount")]
    OutOfRange(String),

    /// The money value is in a currency other than Rupiah.
    #[error("expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Store currency code.
        expected: &'static str,
        /// Currency code of the rejected value.
        actual: &'static str,
    },
}

/// Represents a price in whole Rupiah.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Zero Rupiah.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Convert to a [`Money`] value in the store currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] if the price does not fit the money
    /// representation.
    pub fn to_money(self) -> Result<Money<'static, Currency>, PriceError> {
        let minor = i64::try_from(self.value)
            .ok()
            .and_then(|value| value.checked_mul(minor_per_unit()))
            .ok_or_else(|| PriceError::OutOfRange(self.value.to_string()))?;

        Ok(Money::from_minor(minor, CURRENCY))
    }

    /// Convert a [`Money`] value back into a whole-Rupiah price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] for non-Rupiah money and
    /// [`PriceError::OutOfRange`] for negative or fractional amounts.
    pub fn try_from_money(money: &Money<'_, Currency>) -> Result<Self, PriceError> {
        if money.currency() != CURRENCY {
            return Err(PriceError::CurrencyMismatch {
                expected: CURRENCY.iso_alpha_code,
                actual: money.currency().iso_alpha_code,
            });
        }

        let minor = money.to_minor_units();
        let per_unit = minor_per_unit();

        if minor % per_unit != 0 {
            return Err(PriceError::OutOfRange(money.to_string()));
        }

        u64::try_from(minor / per_unit)
            .map(Price::new)
            .map_err(|_err| PriceError::OutOfRange(money.to_string()))
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Formats as Indonesian Rupiah with `.` thousands grouping, e.g. `Rp 329.000`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp {}", group_thousands(self.value))
    }
}

/// Group the digits of `value` in threes, separated by `.`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(digit);
    }

    grouped
}

fn minor_per_unit() -> i64 {
    10_i64.pow(CURRENCY.exponent)
}
