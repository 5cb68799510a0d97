//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the cart aggregation rules and the catalog-facing
//! domain types, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (mobile frontend)                    │   │
//! │  │    Product List ──► Product Detail ──► Cart ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront app (commands + state)               │   │
//! │  │    add_to_cart, remove_from_cart, update_cart_item, checkout    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ ProductId │  │  (cents)  │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records, products, ids
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart aggregate and its line items
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product, ProductId};
//!
//! let mut cart = Cart::new();
//! cart.add(&Product::new(1, "Backpack", Money::from_cents(1000))).unwrap();
//! cart.add(&Product::new(2, "T-Shirt", Money::from_cents(500))).unwrap();
//! cart.remove(&ProductId::from(1));
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total().to_string(), "$5.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLimits, CartLineItem, CartTotals, UpdateOutcome};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of distinct line items in a cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Default maximum quantity of a single line item.
///
/// Guards against a runaway quantity (typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
