//! Aurea
//!
//! Aurea is the storefront core of a small footwear shop: a product catalog with
//! search and HTML rendering, and a persisted shopping cart with checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod render;
pub mod storefront;
