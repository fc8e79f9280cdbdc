//! Product datasets
//!
//! A dataset is an externally supplied product list. It is read from JSON or
//! YAML, either as a bare list or wrapped in a `products:` key, and validated
//! before the catalog accepts it.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Dataset loading and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a dataset file
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("failed to parse YAML dataset: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// File extension is not `.json`, `.yaml` or `.yml`
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// Dataset has no products
    #[error("dataset contains no products")]
    Empty,

    /// Product ids must be positive
    #[error("product {0:?} has id 0")]
    InvalidId(String),

    /// Two products share an id
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// Two products share a name
    #[error("duplicate product name: {0}")]
    DuplicateName(String),

    /// Rating outside 0 to 5
    #[error("product {id} has rating {rating}, expected 0 to 5")]
    RatingOutOfRange {
        /// Offending product
        id: ProductId,
        /// Rating found in the dataset
        rating: Decimal,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { products: Vec<Product> },
    Bare(Vec<Product>),
}

impl From<DatasetFile> for Vec<Product> {
    fn from(file: DatasetFile) -> Self {
        match file {
            DatasetFile::Wrapped { products } | DatasetFile::Bare(products) => products,
        }
    }
}

/// An externally supplied product list and a label for where it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    origin: String,
    products: Vec<Product>,
}

impl Dataset {
    /// Wrap an in-memory product list.
    pub fn new(origin: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            origin: origin.into(),
            products,
        }
    }

    /// Read a dataset file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// extension is not a supported format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(origin, &fs::read_to_string(path)?),
            Some("yaml" | "yml") => Self::from_yaml_str(origin, &fs::read_to_string(path)?),
            _ => Err(CatalogError::UnsupportedFormat(origin)),
        }
    }

    /// Parse a JSON dataset.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is not a product list.
    pub fn from_json_str(origin: impl Into<String>, contents: &str) -> Result<Self, CatalogError> {
        let file: DatasetFile = serde_json::from_str(contents)?;

        Ok(Self::new(origin, file.into()))
    }

    /// Parse a YAML dataset.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is not a product list.
    pub fn from_yaml_str(origin: impl Into<String>, contents: &str) -> Result<Self, CatalogError> {
        let file: DatasetFile = serde_norway::from_str(contents)?;

        Ok(Self::new(origin, file.into()))
    }

    /// Where the dataset came from (a file path or a caller supplied label).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Products in dataset order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Check the catalog invariants: non-empty, positive unique ids, unique
    /// names, ratings within 0 to 5.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in dataset order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = FxHashSet::default();
        let mut names = FxHashSet::default();
        let max_rating = Decimal::from(5);

        for product in &self.products {
            if product.id.get() == 0 {
                return Err(CatalogError::InvalidId(product.name.clone()));
            }

            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }

            if !names.insert(product.name.as_str()) {
                return Err(CatalogError::DuplicateName(product.name.clone()));
            }

            if product.rating.is_sign_negative() || product.rating > max_rating {
                return Err(CatalogError::RatingOutOfRange {
                    id: product.id,
                    rating: product.rating,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn into_products(self) -> Vec<Product> {
        self.products
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    const YAML: &str = r"
products:
  - id: 10
    name: Ivory Tweed
    price: 459000
    category: Loafers
    description: Tweed loafers
    rating: 4.5
    isFeatured: true
  - id: 11
    name: Emerald Mule
    price: 399000
    category: Mules
    description: Velvet mules
    rating: 5
    isNew: true
";

    #[test]
    fn parses_wrapped_yaml() -> TestResult {
        let dataset = Dataset::from_yaml_str("inline", YAML)?;

        assert_eq!(dataset.origin(), "inline");
        assert_eq!(dataset.products().len(), 2);
        assert!(dataset.validate().is_ok());

        Ok(())
    }

    #[test]
    fn parses_bare_json_list() -> TestResult {
        let dataset = Dataset::from_json_str(
            "inline",
            r#"[{"id": 1, "name": "A", "price": 1, "category": "C", "description": "D"}]"#,
        )?;

        assert_eq!(dataset.products().len(), 1);

        Ok(())
    }

    #[test]
    fn from_path_picks_format_by_extension() -> TestResult {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile()?;
        file.write_all(YAML.as_bytes())?;

        let dataset = Dataset::from_path(file.path())?;

        assert_eq!(dataset.products().len(), 2);

        Ok(())
    }

    #[test]
    fn from_path_rejects_unknown_extension() -> TestResult {
        let file = tempfile::Builder::new().suffix(".csv").tempfile()?;

        let result = Dataset::from_path(file.path());

        assert!(matches!(result, Err(CatalogError::UnsupportedFormat(_))));

        Ok(())
    }

    #[test]
    fn validate_rejects_empty_dataset() {
        let dataset = Dataset::new("empty", Vec::new());

        assert!(matches!(dataset.validate(), Err(CatalogError::Empty)));
    }

    #[test]
    fn validate_rejects_duplicate_ids() -> TestResult {
        let mut dataset = Dataset::from_yaml_str("inline", YAML)?;
        if let Some(second) = dataset.products.get_mut(1) {
            second.id = ProductId::new(10);
        }

        assert!(matches!(
            dataset.validate(),
            Err(CatalogError::DuplicateId(id)) if id == ProductId::new(10)
        ));

        Ok(())
    }

    #[test]
    fn validate_rejects_duplicate_names() -> TestResult {
        let mut dataset = Dataset::from_yaml_str("inline", YAML)?;
        if let Some(second) = dataset.products.get_mut(1) {
            second.name = "Ivory Tweed".to_string();
        }

        assert!(matches!(
            dataset.validate(),
            Err(CatalogError::DuplicateName(name)) if name == "Ivory Tweed"
        ));

        Ok(())
    }

    #[test]
    fn validate_rejects_zero_id_and_bad_rating() -> TestResult {
        let mut zero_id = Dataset::from_yaml_str("inline", YAML)?;
        if let Some(first) = zero_id.products.get_mut(0) {
            first.id = ProductId::new(0);
        }

        let mut bad_rating = Dataset::from_yaml_str("inline", YAML)?;
        if let Some(first) = bad_rating.products.get_mut(0) {
            first.rating = Decimal::new(51, 1);
        }

        assert!(matches!(zero_id.validate(), Err(CatalogError::InvalidId(_))));
        assert!(matches!(
            bad_rating.validate(),
            Err(CatalogError::RatingOutOfRange { .. })
        ));

        Ok(())
    }
}
