//! Aurea prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Ledger, LedgerError,
        items::LineItem,
        observer::{LedgerObserver, NoopObserver, Notifications},
        storage::{CART_KEY, CartStorage, FileStorage, MemoryStorage, StorageError},
    },
    catalog::{CatalogError, CatalogStore, Dataset, Filter, Provenance, SourceInfo},
    checkout::{CheckoutError, Order, OrderNumber, PaymentMethod},
    contact::{ContactError, ContactMessage},
    prices::{CURRENCY, Price, PriceError},
    pricing::{TotalPriceError, Totals},
    products::{Product, ProductId},
    receipt::{ReceiptError, write_cart, write_order},
    render::Container,
    storefront::{Storefront, StorefrontError},
};
