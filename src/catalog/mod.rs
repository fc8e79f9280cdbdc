//! Catalog Store
//!
//! Holds the product list and answers queries against it. The list is loaded
//! lazily, exactly once, from the dataset handed to the constructor, or from
//! the built-in sample products when there is none or it fails validation.

use std::{
    path::Path,
    sync::{Mutex, OnceLock},
};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::{
    products::{Product, ProductId},
    render::{self, Container},
};

pub mod dataset;
mod fallback;

pub use dataset::{CatalogError, Dataset};

/// Where the loaded products came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The dataset supplied to the store
    External,

    /// The built-in sample products
    Fallback,
}

/// Snapshot of the store's loading state, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    /// Data source, `None` until the first load
    pub source: Option<Provenance>,

    /// Number of loaded products
    pub product_count: usize,

    /// Whether the products have been loaded
    pub is_loaded: bool,
}

/// Which subset of the catalog to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every product
    #[default]
    All,

    /// Products flagged as featured
    Featured,

    /// Products flagged as new
    New,

    /// Products in a category (exact, case-sensitive)
    Category(String),

    /// Products matching a search term
    Search(String),
}

impl Filter {
    /// Category filter, where the pseudo-category `all` selects every product.
    pub fn category(category: impl Into<String>) -> Self {
        let category = category.into();

        if category == "all" {
            Self::All
        } else {
            Self::Category(category)
        }
    }
}

#[derive(Debug)]
struct Loaded {
    products: Vec<Product>,
    provenance: Provenance,
    origin: Option<String>,
    rejection: Option<CatalogError>,
    by_id: FxHashMap<ProductId, usize>,
    by_name: FxHashMap<String, usize>,
}

impl Loaded {
    fn build(source: Option<Result<Dataset, CatalogError>>) -> Self {
        let dataset = source.map(|dataset| {
            dataset.and_then(|dataset| dataset.validate().map(|()| dataset))
        });

        match dataset {
            Some(Ok(dataset)) => {
                let origin = dataset.origin().to_string();
                let products = dataset.into_products();

                info!(%origin, count = products.len(), "loaded products from dataset");

                Self::index(products, Provenance::External, Some(origin), None)
            }
            Some(Err(error)) => {
                warn!(%error, "dataset rejected, using sample products");

                Self::index(fallback::products(), Provenance::Fallback, None, Some(error))
            }
            None => {
                info!("no dataset supplied, using sample products");

                Self::index(fallback::products(), Provenance::Fallback, None, None)
            }
        }
    }

    fn index(
        products: Vec<Product>,
        provenance: Provenance,
        origin: Option<String>,
        rejection: Option<CatalogError>,
    ) -> Self {
        let mut by_id = FxHashMap::default();
        let mut by_name = FxHashMap::default();

        // First occurrence wins, matching a front-to-back scan.
        for (idx, product) in products.iter().enumerate() {
            by_id.entry(product.id).or_insert(idx);
            by_name.entry(product.name.clone()).or_insert(idx);
        }

        Self {
            products,
            provenance,
            origin,
            rejection,
            by_id,
            by_name,
        }
    }
}

/// Catalog Store
#[derive(Debug)]
pub struct CatalogStore {
    pending: Mutex<Option<Result<Dataset, CatalogError>>>,
    loaded: OnceLock<Loaded>,
}

impl CatalogStore {
    /// Create a store over an optional dataset. Without one, the store serves
    /// the built-in sample products.
    pub fn new(dataset: Option<Dataset>) -> Self {
        Self::with_source(dataset.map(Ok))
    }

    /// Create a store over the dataset file at `path`.
    ///
    /// A file that cannot be read or parsed is not an error here: the store
    /// falls back to the sample products and reports the reason through
    /// [`CatalogStore::rejection`].
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::with_source(Some(Dataset::from_path(path)))
    }

    fn with_source(source: Option<Result<Dataset, CatalogError>>) -> Self {
        Self {
            pending: Mutex::new(source),
            loaded: OnceLock::new(),
        }
    }

    fn state(&self) -> &Loaded {
        self.loaded.get_or_init(|| {
            let source = self
                .pending
                .lock()
                .ok()
                .and_then(|mut pending| pending.take());

            Loaded::build(source)
        })
    }

    /// Load the products. Only the first call does any work; later calls
    /// return the same list.
    pub fn load(&self) -> &[Product] {
        &self.state().products
    }

    /// Every product, in dataset order.
    pub fn all(&self) -> &[Product] {
        self.load()
    }

    /// Products flagged as featured.
    pub fn featured(&self) -> Vec<&Product> {
        self.all().iter().filter(|product| product.is_featured).collect()
    }

    /// Products flagged as new.
    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.all().iter().filter(|product| product.is_new).collect()
    }

    /// Look a product up by id.
    pub fn by_id(&self, id: impl Into<ProductId>) -> Option<&Product> {
        let state = self.state();

        state
            .by_id
            .get(&id.into())
            .and_then(|&idx| state.products.get(idx))
    }

    /// Look a product up by an id given as text, see [`ProductId::parse_lenient`].
    pub fn by_id_str(&self, id: &str) -> Option<&Product> {
        ProductId::parse_lenient(id).and_then(|id| self.by_id(id))
    }

    /// Products in `category`, compared exactly.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.all()
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, description and category.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();

        let results: Vec<&Product> = self
            .all()
            .iter()
            .filter(|product| product.matches_lowercase(&needle))
            .collect();

        debug!(query, hits = results.len(), "catalog search");

        results
    }

    /// Look a product up by its exact name.
    pub fn by_name(&self, name: &str) -> Option<&Product> {
        let state = self.state();

        state
            .by_name
            .get(name)
            .and_then(|&idx| state.products.get(idx))
    }

    /// Products selected by `filter`.
    pub fn filter(&self, filter: &Filter) -> Vec<&Product> {
        match filter {
            Filter::All => self.all().iter().collect(),
            Filter::Featured => self.featured(),
            Filter::New => self.new_arrivals(),
            Filter::Category(category) => self.by_category(category),
            Filter::Search(query) => self.search(query),
        }
    }

    /// Replace the contents of `container` with the cards selected by `filter`.
    pub fn render_into(&self, container: &mut Container, filter: &Filter) {
        let products = self.filter(filter);

        debug!(container = container.id(), ?filter, count = products.len(), "rendering grid");

        container.replace(render::product_grid(products));
    }

    /// Loading state, without triggering a load.
    pub fn source_info(&self) -> SourceInfo {
        match self.loaded.get() {
            Some(state) => SourceInfo {
                source: Some(state.provenance),
                product_count: state.products.len(),
                is_loaded: true,
            },
            None => SourceInfo {
                source: None,
                product_count: 0,
                is_loaded: false,
            },
        }
    }

    /// The loaded data's provenance.
    pub fn provenance(&self) -> Provenance {
        self.state().provenance
    }

    /// Origin label of the accepted dataset, if the store is serving one.
    pub fn origin(&self) -> Option<&str> {
        self.state().origin.as_deref()
    }

    /// Why the supplied dataset was not used, if it was rejected.
    pub fn rejection(&self) -> Option<&CatalogError> {
        self.state().rejection.as_ref()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::prices::Price;

    use super::*;

    fn product(id: u64, name: &str, category: &str, description: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::new(100_000 * id),
            image: String::new(),
            category: category.to_string(),
            description: description.to_string(),
            long_description: String::new(),
            features: smallvec::smallvec![],
            sizes: smallvec::smallvec![],
            colors: smallvec::smallvec![],
            stock: 5,
            rating: Decimal::new(4, 0),
            reviews: 1,
            is_new: id % 2 == 0,
            is_featured: id == 1,
        }
    }

    fn store() -> CatalogStore {
        CatalogStore::new(Some(Dataset::new(
            "test",
            vec![
                product(1, "Velvet Loafer", "Loafers", "Soft velvet"),
                product(2, "Satin Mule", "Mules", "A loafer-like mule"),
                product(3, "Pearl Flat", "Ballet Flats", "Pearl charm"),
                product(4, "Ivory Mule", "Mules", "Ivory tweed"),
            ],
        )))
    }

    #[test]
    fn without_dataset_loads_sample_products() {
        let store = CatalogStore::default();

        assert_eq!(store.load().len(), 3);
        assert_eq!(store.provenance(), Provenance::Fallback);
        assert!(store.rejection().is_none());
    }

    #[test]
    fn load_is_idempotent() {
        let store = store();

        let first = store.load().as_ptr();
        let second = store.load().as_ptr();

        assert_eq!(first, second);
        assert_eq!(store.provenance(), Provenance::External);
        assert_eq!(store.origin(), Some("test"));
    }

    #[test]
    fn source_info_does_not_trigger_load() {
        let store = store();

        assert_eq!(
            store.source_info(),
            SourceInfo {
                source: None,
                product_count: 0,
                is_loaded: false,
            }
        );

        store.load();

        assert_eq!(
            store.source_info(),
            SourceInfo {
                source: Some(Provenance::External),
                product_count: 4,
                is_loaded: true,
            }
        );
    }

    #[test]
    fn invalid_dataset_falls_back_with_rejection() {
        let store = CatalogStore::new(Some(Dataset::new(
            "dupes",
            vec![
                product(1, "Same", "Loafers", "a"),
                product(2, "Same", "Loafers", "b"),
            ],
        )));

        assert_eq!(store.load().len(), 3);
        assert_eq!(store.provenance(), Provenance::Fallback);
        assert!(matches!(
            store.rejection(),
            Some(CatalogError::DuplicateName(name)) if name == "Same"
        ));
    }

    #[test]
    fn unreadable_file_falls_back() {
        let store = CatalogStore::from_path("/nonexistent/aurea/products.json");

        assert_eq!(store.provenance(), Provenance::Fallback);
        assert!(matches!(store.rejection(), Some(CatalogError::Io(_))));
    }

    #[test]
    fn subsets_preserve_order_and_flags() {
        let store = store();

        let featured: Vec<u64> = store.featured().iter().map(|p| p.id.get()).collect();
        let new: Vec<u64> = store.new_arrivals().iter().map(|p| p.id.get()).collect();

        assert_eq!(featured, vec![1]);
        assert_eq!(new, vec![2, 4]);
    }

    #[test]
    fn by_id_and_by_name_find_every_product() {
        let store = store();

        for product in store.all() {
            assert_eq!(store.by_id(product.id), Some(product));
            assert_eq!(store.by_name(&product.name), Some(product));
        }

        assert!(store.by_id(99_u64).is_none());
        assert!(store.by_name("velvet loafer").is_none());
    }

    #[test]
    fn by_id_str_coerces_input() -> TestResult {
        let store = store();

        let product = store.by_id_str("3abc").ok_or("product 3 not found")?;

        assert_eq!(product.name, "Pearl Flat");
        assert!(store.by_id_str("abc").is_none());

        Ok(())
    }

    #[test]
    fn by_category_is_exact_and_case_sensitive() {
        let store = store();

        assert_eq!(store.by_category("Mules").len(), 2);
        assert!(store.by_category("mules").is_empty());
        assert!(store.by_category("Sneakers").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_without_duplicates() {
        let store = store();

        let names: Vec<&str> = store
            .search("LOAFER")
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        // "Velvet Loafer" matches on name and category, "Satin Mule" on description.
        assert_eq!(names, vec!["Velvet Loafer", "Satin Mule"]);
    }

    #[test]
    fn filter_dispatches_to_queries() {
        let store = store();

        assert_eq!(store.filter(&Filter::All).len(), 4);
        assert_eq!(store.filter(&Filter::Featured).len(), 1);
        assert_eq!(store.filter(&Filter::New).len(), 2);
        assert_eq!(store.filter(&Filter::category("Mules")).len(), 2);
        assert_eq!(store.filter(&Filter::category("all")).len(), 4);
        assert_eq!(store.filter(&Filter::Search("ivory".to_string())).len(), 1);
    }

    #[test]
    fn render_into_replaces_container_contents() {
        let store = store();
        let mut container = Container::new("products-grid");

        store.render_into(&mut container, &Filter::All);
        let all = container.html().matches("class=\"product-card\"").count();

        store.render_into(&mut container, &Filter::Featured);
        let featured = container.html().matches("class=\"product-card\"").count();

        assert_eq!(all, 4);
        assert_eq!(featured, 1);
    }
}
