//! # Product Commands
//!
//! Product list and detail lookups backing the browse screens.
//!
//! ```text
//! Product List screen ──► list_products() ──► Vec<ProductDto>
//!         │
//!    tap a card
//!         ▼
//! Product Detail screen ──► get_product(id) ──► ProductDto / NOT_FOUND
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;
use storefront_core::{Product, ProductId};

/// Product DTO (Data Transfer Object) for screens.
///
/// ## Why DTO?
/// - Decouples the domain model from the screen contract
/// - Flattens the optional rating to a plain score
/// - Handles serde rename to camelCase for JS consumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub title: String,
    pub price_cents: i64,
    pub image: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// 0.0 when the catalog has no rating.
    pub rating: f64,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id.to_string(),
            title: p.title.clone(),
            price_cents: p.price.cents(),
            image: p.image.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            rating: p.rating_score(),
        }
    }
}

/// Lists every product in catalog order.
pub fn list_products(catalog: &CatalogState) -> Vec<ProductDto> {
    debug!(count = catalog.len(), "list_products command");
    catalog.list().iter().map(ProductDto::from).collect()
}

/// Gets one product for the detail screen.
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the catalog.
pub fn get_product(catalog: &CatalogState, product_id: &str) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "get_product command");

    catalog
        .get(&ProductId::new(product_id.trim()))
        .map(ProductDto::from)
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{Money, Rating};

    fn catalog() -> CatalogState {
        CatalogState::new(vec![
            Product::new(1, "Backpack", Money::from_cents(10995)).with_rating(Rating {
                rate: 3.9,
                count: Some(120),
            }),
            Product::new(2, "Shirt", Money::from_cents(2230)),
        ])
    }

    #[test]
    fn test_list_products() {
        let products = list_products(&catalog());
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].rating, 3.9);
        assert_eq!(products[1].rating, 0.0);
    }

    #[test]
    fn test_get_product() {
        let product = get_product(&catalog(), " 2 ").unwrap();
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.price_cents, 2230);

        let err = get_product(&catalog(), "99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
