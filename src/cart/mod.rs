//! Cart Ledger
//!
//! The ordered list of line items, persisted after every change. Every
//! mutation first re-reads storage, so a second ledger over the same storage
//! (another tab) never has its additions overwritten.

use jiff::Zoned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    checkout::{self, CheckoutError, Order, OrderNumbers},
    prices::Price,
    pricing::{self, TotalPriceError},
};

pub mod items;
pub mod observer;
pub mod storage;

use items::LineItem;
use observer::{LedgerObserver, NoopObserver};
use storage::{CartStorage, StorageError};

/// Errors raised by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Removal index outside the list
    #[error("no cart item at index {index}, cart has {len} items")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of items in the cart
        len: usize,
    },

    /// Checkout input was rejected
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Totals could not be computed
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Cart Ledger
#[derive(Debug)]
pub struct Ledger<S, O = NoopObserver> {
    storage: S,
    observer: O,
    items: Vec<LineItem>,
    order_numbers: OrderNumbers,
}

impl<S: CartStorage> Ledger<S> {
    /// Open the ledger persisted in `storage`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::Storage`] if the backend cannot be read. An
    /// unreadable stored value is not an error: the ledger starts empty.
    pub fn open(storage: S) -> Result<Self, LedgerError> {
        Self::open_with_observer(storage, NoopObserver)
    }
}

impl<S: CartStorage, O: LedgerObserver> Ledger<S, O> {
    /// Open the ledger persisted in `storage`, reporting events to `observer`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::Storage`] if the backend cannot be read.
    pub fn open_with_observer(storage: S, observer: O) -> Result<Self, LedgerError> {
        let mut ledger = Self {
            storage,
            observer,
            items: Vec::new(),
            order_numbers: OrderNumbers::new(),
        };

        ledger.refresh()?;

        Ok(ledger)
    }

    /// Re-read the items from storage.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::Storage`] if the backend cannot be read.
    pub fn refresh(&mut self) -> Result<(), LedgerError> {
        let stored = storage::load_items(&self.storage)?;

        if let Some(error) = stored.corruption {
            warn!(%error, "stored cart is unreadable, starting empty");

            self.observer.storage_recovered(&error);
        }

        self.items = stored.items;

        Ok(())
    }

    /// Append an item and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::Storage`] if the cart cannot be read or
    /// written. The ledger is unchanged on error.
    pub fn add(&mut self, name: impl Into<String>, price: Price) -> Result<(), LedgerError> {
        self.refresh()?;

        let item = LineItem::new(name, price);

        let mut items = self.items.clone();
        items.push(item.clone());
        self.replace(items)?;

        debug!(name = %item.name, price = *item.price, count = self.items.len(), "added to cart");

        self.observer.item_added(&item);
        self.observer.count_changed(self.items.len());

        Ok(())
    }

    /// Remove the item at `index` and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IndexOutOfRange`] if there is no item at
    /// `index`, or a [`LedgerError::Storage`] if the cart cannot be read or
    /// written. The ledger is unchanged on error.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        self.refresh()?;

        let len = self.items.len();
        if index >= len {
            return Err(LedgerError::IndexOutOfRange { index, len });
        }

        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.replace(items)?;

        debug!(index, name = %removed.name, count = self.items.len(), "removed from cart");

        self.observer.item_removed(index, &removed);
        self.observer.count_changed(self.items.len());

        Ok(removed)
    }

    /// Items in the order they were added.
    pub fn list(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices, summed the same way checkout does.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the sum does not fit a price.
    pub fn total(&self) -> Result<Price, TotalPriceError> {
        pricing::subtotal(&self.items)
    }

    /// Check out with the current time, see [`Ledger::checkout_at`].
    ///
    /// # Errors
    ///
    /// See [`Ledger::checkout_at`].
    pub fn checkout(&mut self, address: &str, payment: Option<&str>) -> Result<Order, LedgerError> {
        self.checkout_at(address, payment, Zoned::now())
    }

    /// Validate the input, build the order, then clear and persist the cart.
    ///
    /// The order snapshots the items before the cart is cleared, and the cart
    /// is cleared before the order is returned for display.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Checkout`] when validation fails, and a
    /// [`LedgerError::Storage`] or [`LedgerError::TotalPrice`] when the order
    /// cannot be committed. The ledger is unchanged on error.
    pub fn checkout_at(
        &mut self,
        address: &str,
        payment: Option<&str>,
        now: Zoned,
    ) -> Result<Order, LedgerError> {
        self.refresh()?;

        let valid = match checkout::validate(&self.items, address, payment) {
            Ok(valid) => valid,
            Err(error) => {
                info!(%error, "checkout rejected");

                self.observer.checkout_rejected(&error);

                return Err(error.into());
            }
        };

        let totals = pricing::totals(&self.items)?;
        let number = self.order_numbers.next(now.timestamp());

        let order = Order::new(
            number,
            self.items.clone(),
            totals,
            valid.payment,
            valid.address.to_string(),
            now,
        );

        self.replace(Vec::new())?;

        info!(
            order = %order.number(),
            items = order.items().len(),
            total = *order.total(),
            payment = order.payment().as_str(),
            "checkout committed"
        );

        self.observer.count_changed(0);
        self.observer.checked_out(&order);

        Ok(order)
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Persist first, so a failed write leaves the in-memory list as it was.
    fn replace(&mut self, items: Vec<LineItem>) -> Result<(), LedgerError> {
        storage::save_items(&self.storage, &items)?;

        self.items = items;

        Ok(())
    }
}
