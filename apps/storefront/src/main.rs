//! # Storefront Entry Point
//!
//! ```text
//! $ storefront
//! Welcome to Storefront. Type 'help' for commands.
//! > products
//! > add 1
//! > cart
//! > checkout
//! ```
//!
//! Setup lives in `lib.rs` so it can be tested.

fn main() {
    if let Err(e) = storefront_app::run() {
        eprintln!("storefront: {}", e);
        std::process::exit(1);
    }
}
