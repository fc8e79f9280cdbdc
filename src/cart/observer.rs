//! Ledger Observer

use crate::{
    cart::items::LineItem,
    checkout::{CheckoutError, Order},
};

/// Callbacks for ledger events, the hook for notifications and the cart
/// counter in a user interface.
///
/// Every method has an empty default, so observers only implement what they
/// display.
pub trait LedgerObserver {
    /// An item was appended and persisted.
    fn item_added(&mut self, _item: &LineItem) {}

    /// The item at `index` was removed and the list persisted.
    fn item_removed(&mut self, _index: usize, _item: &LineItem) {}

    /// The number of items changed.
    fn count_changed(&mut self, _count: usize) {}

    /// A checkout committed and the ledger was cleared.
    fn checked_out(&mut self, _order: &Order) {}

    /// A checkout was rejected; the ledger is unchanged.
    fn checkout_rejected(&mut self, _error: &CheckoutError) {}

    /// The stored cart was unreadable and has been treated as empty.
    fn storage_recovered(&mut self, _error: &serde_json::Error) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LedgerObserver for NoopObserver {}

/// Collects the user-facing messages and the latest cart count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    messages: Vec<String>,
    count: usize,
}

impl Notifications {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in the order they were raised.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Most recent message.
    pub fn latest(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Cart count as last reported.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Take the pending messages, leaving none.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl LedgerObserver for Notifications {
    fn item_added(&mut self, item: &LineItem) {
        self.messages.push(format!("{} added to cart", item.name));
    }

    fn item_removed(&mut self, _index: usize, item: &LineItem) {
        self.messages.push(format!("{} removed from cart", item.name));
    }

    fn count_changed(&mut self, count: usize) {
        self.count = count;
    }

    fn checked_out(&mut self, order: &Order) {
        self.messages.push(format!("Order {} placed", order.number()));
    }

    fn checkout_rejected(&mut self, error: &CheckoutError) {
        let mut message = error.to_string();

        if let Some(first) = message.get_mut(..1) {
            first.make_ascii_uppercase();
        }

        self.messages.push(message);
    }

    fn storage_recovered(&mut self, _error: &serde_json::Error) {
        self.messages
            .push("Saved cart could not be read and was reset".to_string());
    }
}
