//! # Storefront Library
//!
//! Application layer for the storefront: state, commands, and the session
//! shell that drives them.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Shared cart store + subscriptions
//! │   ├── catalog.rs  ◄─── Read-only product catalog
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Product list/detail commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Checkout
//! │   └── config.rs   ◄─── Config command
//! ├── shell.rs        ◄─── Line-oriented session front end
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌──────────────────┐ ┌──────────────────────┐ ┌──────────────────────┐
//! │  CatalogState    │ │  Arc<CartStore>      │ │  ConfigState         │
//! │                  │ │                      │ │                      │
//! │  • Products      │ │  • Line items        │ │  • Store name        │
//! │  • Lookup by id  │ │  • watch + observers │ │  • Cart limits       │
//! └──────────────────┘ └──────────────────────┘ └──────────────────────┘
//! ```
//! Each command takes only the state it needs.

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shell::Session;
use state::{CartSnapshot, CartStore, CatalogState, ConfigState};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

/// Runs a storefront session on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// 1. Initialize logging (RUST_LOG overrides the default filter)
/// 2. Load config: defaults → TOML file → STOREFRONT_* env vars
/// 3. Load the catalog (fallback products when unset or unreadable)
/// 4. Create the cart store with the configured limits
/// 5. Run the shell until EOF or `quit`
/// ```
pub fn run() -> std::io::Result<()> {
    init_tracing();

    info!("Starting storefront");

    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = ConfigState::load_or_default(config_path);
    let catalog = CatalogState::load_or_fallback(config.catalog_path.as_deref());
    info!(products = catalog.len(), store = %config.store_name, "Catalog ready");

    let cart = Arc::new(CartStore::new(config.cart_limits()));
    cart.add_observer(Arc::new(|snapshot: &CartSnapshot| {
        debug!(
            version = snapshot.version,
            items = snapshot.totals.item_count,
            total_cents = snapshot.totals.total_cents,
            "Cart changed"
        );
    }));

    let session = Session::new(config, catalog, cart);
    let stdin = std::io::stdin();
    session.run(stdin.lock(), std::io::stdout().lock())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with session output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_app=trace` - Trace for the app crate only
/// - Default: `warn,storefront_app=info`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront_app=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
