//! # Checkout Command
//!
//! Turns the current cart into a receipt and starts a fresh cart.
//!
//! ```text
//! checkout()
//!    │
//!    ▼
//! CartStore::take()  ── drains the cart atomically
//!    │
//!    ├── empty?  ──► CART_ERROR "Cart is empty" (nothing changed)
//!    │
//!    └── items   ──► CheckoutReceipt { order_id, items, total, placed_at }
//! ```
//!
//! Payment is handled outside this app; the receipt is what gets handed on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::CartStore;
use storefront_core::CartLineItem;

/// Summary of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: Uuid,
    pub items: Vec<CartLineItem>,
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
    pub placed_at: DateTime<Utc>,
}

/// Checks out the cart.
///
/// ## Errors
/// `CART_ERROR` when the cart is empty.
pub fn checkout(cart: &CartStore) -> Result<CheckoutReceipt, ApiError> {
    debug!("checkout command");

    let taken = cart.take();
    if taken.is_empty() {
        return Err(ApiError::cart("Cart is empty"));
    }

    let receipt = CheckoutReceipt {
        order_id: Uuid::new_v4(),
        item_count: taken.totals.item_count,
        total_quantity: taken.totals.total_quantity,
        total_cents: taken.totals.total_cents,
        items: taken.items,
        placed_at: Utc::now(),
    };

    info!(
        order_id = %receipt.order_id,
        items = receipt.item_count,
        total_cents = receipt.total_cents,
        "Checkout complete"
    );
    Ok(receipt)
}
