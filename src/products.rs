//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::prices::Price;

/// Ordered list of display labels (features, sizes, colors).
pub type Labels = SmallVec<[String; 5]>;

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a product id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw integer id.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Coerce user input (a query string parameter, a data attribute) into an id.
    ///
    /// Leading whitespace and a `+` sign are skipped and the leading run of
    /// digits is used, so `"12"`, `" 12"` and `"12-pearl"` all yield `12`. A
    /// `0x` or `0X` prefix reads hex digits instead, so `"0x10"` yields `16`.
    /// Input without leading digits, or with a minus sign, yields `None`.
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let trimmed = input.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let (body, radix) = match unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (unsigned, 10),
        };

        let digits: String = body
            .chars()
            .take_while(|ch| ch.is_digit(radix))
            .collect();

        u64::from_str_radix(&digits, radix).ok().map(Self)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
///
/// Field names follow the storefront's dataset format (`longDescription`,
/// `isNew`, `isFeatured`), so existing JSON product data loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, positive product id
    pub id: ProductId,

    /// Unique display name
    pub name: String,

    /// Price in whole Rupiah
    pub price: Price,

    /// Image path shown on the product card
    #[serde(default)]
    pub image: String,

    /// Category label
    pub category: String,

    /// Short description shown on the card
    pub description: String,

    /// Long description shown on the detail view
    #[serde(default)]
    pub long_description: String,

    /// Feature bullet points
    #[serde(default)]
    pub features: Labels,

    /// Selectable sizes
    #[serde(default)]
    pub sizes: Labels,

    /// Selectable colors
    #[serde(default)]
    pub colors: Labels,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Average rating, 0 to 5
    #[serde(default)]
    pub rating: Decimal,

    /// Number of reviews
    #[serde(default)]
    pub reviews: u32,

    /// Shown in the "new" subset
    #[serde(default)]
    pub is_new: bool,

    /// Shown in the "featured" subset
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    /// Whether any units are in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether `needle` occurs in the name, description or category, ignoring case.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.category]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
