//! # Commands Module
//!
//! Every operation a screen can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Product list / detail
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Checkout (drain cart into a receipt)
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState) -> Vec<Product>
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartStore) -> CartResponse
//!
//! // Needs both
//! fn add_to_cart(catalog: &CatalogState, cart: &CartStore, product_id: &str)
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod product;
