//! # Validation Module
//!
//! Input validation for everything that reaches the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog boundary                                             │
//! │  └── CatalogRecord → Product (id present, price finite & >= 0)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart mutation (THIS MODULE)                                  │
//! │  └── Product re-checked on every add                                   │
//! │                                                                         │
//! │  A failed check never touches the line items.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_price, validate_product};
//! use storefront_core::{Money, Product};
//!
//! validate_price(Money::from_cents(1999)).unwrap();
//! validate_product(&Product::new(1, "Backpack", Money::from_cents(1999))).unwrap();
//! assert!(validate_price(Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_id;
/// use storefront_core::ProductId;
///
/// assert!(validate_product_id(&ProductId::from(1)).is_ok());
/// assert!(validate_product_id(&ProductId::new("")).is_err());
/// ```
pub fn validate_product_id(id: &ProductId) -> ValidationResult<()> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a product before it is added to the cart.
///
/// `Product` fields are public, so a caller can build one that never went
/// through the catalog conversion. The add path checks again.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_price(product.price)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(&ProductId::from(1)).is_ok());
        assert!(validate_product_id(&ProductId::new("abc")).is_ok());

        assert!(validate_product_id(&ProductId::new("")).is_err());
        assert!(validate_product_id(&ProductId::new("  ")).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1999)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_product() {
        let ok = Product::new(1, "Ok", Money::from_cents(100));
        assert!(validate_product(&ok).is_ok());

        let no_id = Product::new("", "No id", Money::from_cents(100));
        assert_eq!(
            validate_product(&no_id),
            Err(ValidationError::Required {
                field: "product id".to_string()
            })
        );

        let negative = Product::new(1, "Negative", Money::from_cents(-100));
        assert!(validate_product(&negative).is_err());
    }
}
