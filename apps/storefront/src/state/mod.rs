//! # State Module
//!
//! Session state shared between screens.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types:
//!
//! 1. **Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Commands take only the state they need
//! 3. **Reduced Contention**: The read-only catalog never waits on the cart lock
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ CatalogState │  │    CartStore     │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Vec<Product>│  │  Mutex<Cart>     │  │  store_name      │          │
//! │  │              │  │  watch::Sender   │  │  currency        │          │
//! │  │              │  │  observers       │  │  cart limits     │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: Read-only after load                                  │
//! │  • CartStore: Mutex serializes every read-modify-write                 │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartObserver, CartSnapshot, CartStore, ObserverId};
pub use catalog::{CatalogError, CatalogState};
pub use config::{ConfigError, ConfigState};
