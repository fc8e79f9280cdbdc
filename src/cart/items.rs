//! Line items

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// A product snapshot taken when it was added to the cart.
///
/// Serializes as `{"name": ..., "price": ...}`, the persisted cart format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name at the time it was added
    pub name: String,

    /// Product price at the time it was added
    pub price: Price,
}

impl LineItem {
    /// Creates a new line item
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn serializes_as_name_price_pair() -> TestResult {
        let item = LineItem::new("Blush Charm", Price::new(349_000));

        assert_eq!(
            serde_json::to_string(&item)?,
            r#"{"name":"Blush Charm","price":349000}"#
        );

        Ok(())
    }
}
