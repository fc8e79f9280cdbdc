//! Orders

use std::fmt;

use jiff::{Timestamp, Zoned};

use crate::{
    cart::items::LineItem, checkout::payment::PaymentMethod, prices::Price, pricing::Totals,
};

/// Prefix of every order number.
pub const ORDER_PREFIX: &str = "AUR";

const SUFFIX_MODULUS: u64 = 100_000_000;

/// Order number: [`ORDER_PREFIX`] followed by eight digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// The order number as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues order numbers from the millisecond clock.
///
/// The underlying counter never repeats or goes backwards within a session:
/// a checkout in the same millisecond as the previous one (or after a clock
/// step back) takes the previous value plus one. Only the last eight digits
/// are shown, so numbers are unique per session, not globally.
#[derive(Debug, Default)]
pub struct OrderNumbers {
    last: Option<u64>,
}

impl OrderNumbers {
    /// Create a generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next order number for a checkout at `now`.
    pub fn next(&mut self, now: Timestamp) -> OrderNumber {
        let millis = u64::try_from(now.as_millisecond()).unwrap_or(0);

        let value = match self.last {
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };

        self.last = Some(value);

        OrderNumber(format!("{ORDER_PREFIX}{:08}", value % SUFFIX_MODULUS))
    }
}

/// An immutable summary of a completed checkout. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    number: OrderNumber,
    items: Vec<LineItem>,
    totals: Totals,
    payment: PaymentMethod,
    address: String,
    placed_at: Zoned,
}

impl Order {
    pub(crate) fn new(
        number: OrderNumber,
        items: Vec<LineItem>,
        totals: Totals,
        payment: PaymentMethod,
        address: String,
        placed_at: Zoned,
    ) -> Self {
        Self {
            number,
            items,
            totals,
            payment,
            address,
            placed_at,
        }
    }

    /// Order number
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Items as they were in the cart at checkout
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of item prices
    pub fn subtotal(&self) -> Price {
        self.totals.subtotal
    }

    /// Shipping fee
    pub fn shipping(&self) -> Price {
        self.totals.shipping
    }

    /// Amount paid
    pub fn total(&self) -> Price {
        self.totals.total
    }

    /// Payment method
    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    /// Shipping address, trimmed
    pub fn address(&self) -> &str {
        &self.address
    }

    /// When the order was placed
    pub fn placed_at(&self) -> &Zoned {
        &self.placed_at
    }

    /// Order date, `dd/mm/yyyy`
    pub fn date(&self) -> String {
        self.placed_at.strftime("%d/%m/%Y").to_string()
    }

    /// Order time, `HH.MM.SS`
    pub fn time(&self) -> String {
        self.placed_at.strftime("%H.%M.%S").to_string()
    }
}
