//! Storefront
//!
//! A browsing session: the catalog, the cart ledger and the product open on
//! the detail view.

use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{
        Ledger, LedgerError,
        items::LineItem,
        observer::{LedgerObserver, NoopObserver},
        storage::CartStorage,
    },
    catalog::CatalogStore,
    checkout::Order,
    products::{Product, ProductId},
    render::{self, Container},
};

/// Storefront session errors
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// No product matches the requested id
    #[error("product not found: {0:?}")]
    ProductNotFound(String),

    /// Cart operation failed
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A browsing session over one catalog and one cart.
#[derive(Debug)]
pub struct Storefront<S, O = NoopObserver> {
    catalog: CatalogStore,
    ledger: Ledger<S, O>,
    current: Option<ProductId>,
}

impl<S: CartStorage, O: LedgerObserver> Storefront<S, O> {
    /// Create a session.
    pub fn new(catalog: CatalogStore, ledger: Ledger<S, O>) -> Self {
        Self {
            catalog,
            ledger,
            current: None,
        }
    }

    /// The catalog.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart.
    pub fn ledger(&self) -> &Ledger<S, O> {
        &self.ledger
    }

    /// The cart, mutably.
    pub fn ledger_mut(&mut self) -> &mut Ledger<S, O> {
        &mut self.ledger
    }

    /// Open the detail view for `id`, given as text the way a link carries it.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::ProductNotFound`] if no product matches. The
    /// current product is left as it was.
    pub fn show_product(&mut self, id: &str) -> Result<&Product, StorefrontError> {
        let product = self
            .catalog
            .by_id_str(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))?;

        debug!(id = %product.id, name = %product.name, "showing product");

        self.current = Some(product.id);

        Ok(product)
    }

    /// The product on the detail view, if one was opened.
    pub fn current_product(&self) -> Option<&Product> {
        self.current.and_then(|id| self.catalog.by_id(id))
    }

    /// Render the detail view for the current product into `container`.
    ///
    /// Returns `false`, leaving the container untouched, if no product is open.
    pub fn render_current(&self, container: &mut Container) -> bool {
        match self.current_product() {
            Some(product) => {
                container.replace(render::product_detail(product));
                true
            }
            None => false,
        }
    }

    /// Add the product with `id` to the cart at its catalog price.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::ProductNotFound`] if no product matches, or
    /// [`StorefrontError::Ledger`] if the cart cannot be updated.
    pub fn add_to_cart(&mut self, id: &str) -> Result<LineItem, StorefrontError> {
        let product = self
            .catalog
            .by_id_str(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))?;

        let item = LineItem::new(product.name.clone(), product.price);

        self.ledger.add(item.name.clone(), item.price)?;

        Ok(item)
    }

    /// Remove the cart item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Ledger`] if the index is out of range or the
    /// cart cannot be updated.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<LineItem, StorefrontError> {
        Ok(self.ledger.remove(index)?)
    }

    /// Check out the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Ledger`] if the checkout is rejected or
    /// cannot be committed.
    pub fn checkout(
        &mut self,
        address: &str,
        payment: Option<&str>,
    ) -> Result<Order, StorefrontError> {
        Ok(self.ledger.checkout(address, payment)?)
    }
}
