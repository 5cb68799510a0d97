//! # Domain Types
//!
//! Catalog-facing domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  TryFrom  ┌─────────────────┐                     │
//! │  │  CatalogRecord  │ ────────► │     Product     │                     │
//! │  │  ─────────────  │           │  ─────────────  │                     │
//! │  │  id?  (number)  │           │  id (ProductId) │                     │
//! │  │  title          │           │  title          │                     │
//! │  │  price? (f64)   │           │  price (Money)  │                     │
//! │  │  image          │           │  image          │                     │
//! │  │  rating?        │           │  rating?        │                     │
//! │  └─────────────────┘           └─────────────────┘                     │
//! │     raw JSON shape               validated, immutable                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog hands out loosely shaped JSON. A `CatalogRecord` mirrors that
//! shape as-is; converting it into a `Product` is where the id and price get
//! checked.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_product_id, ValidationResult};

// =============================================================================
// Product Id
// =============================================================================

/// Stable product identifier, unique within the catalog.
///
/// Catalog ids are numeric today, but they are kept as text so a catalog
/// switching to string keys does not ripple through the cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Customer rating as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average score (0.0 - 5.0 in the public catalog).
    pub rate: f64,

    /// Number of ratings, when the catalog reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub count: Option<u32>,
}

// =============================================================================
// Product
// =============================================================================

/// A product as consumed by the cart. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Unit price in cents.
    pub price: Money,

    /// Image URL.
    pub image: String,

    /// Long-form description for the detail screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,

    /// Catalog category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Creates a product with the fields the cart needs.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Money, Product};
    ///
    /// let product = Product::new(1, "Backpack", Money::from_cents(10995));
    /// assert_eq!(product.id.as_str(), "1");
    /// ```
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price,
            image: String::new(),
            description: None,
            category: None,
            rating: None,
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Rating score for display, `0.0` when the catalog has none.
    pub fn rating_score(&self) -> f64 {
        self.rating.map(|r| r.rate).unwrap_or(0.0)
    }
}

// =============================================================================
// Catalog Record
// =============================================================================

/// Catalog ids arrive either as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

/// A product record exactly as the catalog serves it.
///
/// ## Example
/// ```rust
/// use storefront_core::{CatalogRecord, Product};
///
/// let record = CatalogRecord {
///     id: Some(storefront_core::RawId::Number(1)),
///     title: "Backpack".to_string(),
///     price: Some(109.95),
///     ..Default::default()
/// };
/// let product = Product::try_from(record).unwrap();
/// assert_eq!(product.price.cents(), 10995);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: Option<RawId>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub rating: Option<Rating>,
}

impl TryFrom<CatalogRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: CatalogRecord) -> ValidationResult<Self> {
        let id = match record.id {
            Some(RawId::Number(n)) => ProductId::from(n),
            Some(RawId::Text(s)) => ProductId::new(s.trim()),
            None => {
                return Err(ValidationError::Required {
                    field: "product id".to_string(),
                })
            }
        };
        validate_product_id(&id)?;

        let price = record
            .price
            .ok_or_else(|| ValidationError::Required {
                field: "price".to_string(),
            })
            .and_then(Money::try_from_decimal)?;

        Ok(Product {
            id,
            title: record.title,
            price,
            image: record.image,
            description: record.description,
            category: record.category,
            rating: record.rating,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
