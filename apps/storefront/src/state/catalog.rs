//! # Catalog State
//!
//! Read-only product catalog for the session.
//!
//! ## Loading
//! ```text
//! catalog_path set? ──yes──► read JSON array of CatalogRecord
//!        │                          │
//!        no                   ok? ──┴── error?
//!        │                     │          │
//!        ▼                     ▼          ▼
//!   fallback products     validated    warn! + fallback products
//!                         products
//! ```
//!
//! Records that fail validation (no id, bad price) are skipped with a
//! warning rather than failing the whole catalog.

use std::path::{Path, PathBuf};

use storefront_core::{CatalogRecord, Money, Product, ProductId};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog {0} has no valid products")]
    Empty(PathBuf),
}

/// The products available in this session, in catalog order.
#[derive(Debug, Clone)]
pub struct CatalogState {
    products: Vec<Product>,
}

impl CatalogState {
    /// Builds a catalog from already validated products.
    pub fn new(products: Vec<Product>) -> Self {
        CatalogState { products }
    }

    /// Builds a catalog from raw records, skipping invalid ones.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let total = records.len();
        let mut products: Vec<Product> = Vec::with_capacity(total);

        for (index, record) in records.into_iter().enumerate() {
            match Product::try_from(record) {
                Ok(product) if products.iter().any(|p| p.id == product.id) => {
                    warn!(index, id = %product.id, "Skipping duplicate catalog id");
                }
                Ok(product) => products.push(product),
                Err(e) => warn!(index, error = %e, "Skipping invalid catalog record"),
            }
        }

        debug!(loaded = products.len(), total, "Catalog records converted");
        CatalogState { products }
    }

    /// Reads a JSON array of catalog records from `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<CatalogRecord> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_records(records);
        if catalog.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }

        info!(?path, products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Loads from `path` if given, falling back to the built-in products.
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("No catalog path configured, using fallback products");
            return Self::fallback();
        };

        Self::load(path).unwrap_or_else(|e| {
            warn!("Failed to load catalog: {}. Using fallback products.", e);
            Self::fallback()
        })
    }

    /// The two placeholder products shown when the catalog is unavailable.
    pub fn fallback() -> Self {
        CatalogState::new(vec![
            Product::new(1, "Test Product 1", Money::from_cents(1999))
                .with_image("https://via.placeholder.com/150"),
            Product::new(2, "Test Product 2", Money::from_cents(2999))
                .with_image("https://via.placeholder.com/150"),
        ])
    }

    /// All products in catalog order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::fallback()
    }
}
