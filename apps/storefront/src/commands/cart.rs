//! # Cart Commands
//!
//! Cart manipulation for the list, detail, and cart screens.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ NonEmpty │────►│ Checkout │                        │
//! │  │  Cart    │◄────│          │     │          │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                 │                              │
//! │       │           add_to_cart            │                              │
//! │       │           update_cart_item       │                              │
//! │       │           remove_from_cart       │                              │
//! │       │                │                 │                              │
//! │       └──── clear_cart ┘                 │                              │
//! │       └──────────────────────────────────┘  (receipt, cart emptied)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartSnapshot, CartStore, CatalogState};
use storefront_core::{CartLineItem, CartTotals, CoreError, ProductId};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        CartResponse {
            items: snapshot.items,
            totals: snapshot.totals,
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart screen                                                            │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Fjallraven Backpack        Quantity: 2         $219.90       │    │
/// │  │  Mens Casual T-Shirt        Quantity: 1          $22.30       │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Total:                                         $242.20       │    │
/// │  │                       [ Checkout ]                             │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    cart.snapshot().into()
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by 1, position kept
/// - If product not in cart: appended with quantity 1
/// - Price is frozen at the moment of adding
///
/// ## Errors
/// - `NOT_FOUND`: id not in the catalog
/// - `LIMIT_EXCEEDED`: quantity or cart size limit reached
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartStore,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let id = ProductId::new(product_id.trim());
    let product = catalog
        .get(&id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    Ok(cart.add_to_cart(product)?.into())
}

/// Sets the quantity of an item in the cart.
///
/// ## Behavior
/// - Quantity 0: removes the item
/// - Quantity < 0: `VALIDATION_ERROR`, cart unchanged
/// - Quantity > max: `LIMIT_EXCEEDED`, cart unchanged
/// - Product not in cart: no-op
pub fn update_cart_item(
    cart: &CartStore,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let snapshot = cart.update_quantity(&ProductId::new(product_id.trim()), quantity)?;
    Ok(snapshot.into())
}

/// Removes an item from the cart. Removing an absent item is not an error.
pub fn remove_from_cart(cart: &CartStore, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.remove_from_cart(&ProductId::new(product_id.trim())).into()
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartStore) -> CartResponse {
    debug!("clear_cart command");
    cart.clear_cart().into()
}
