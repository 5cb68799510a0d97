//! # Cart Store
//!
//! The single owner of the session's shopping cart.
//!
//! ## Thread Safety
//! The cart sits behind a `Mutex` because:
//! 1. Several screens hold the same store and call into it
//! 2. Each operation is a read-modify-write of the line items
//! 3. Two racing adds of the same product must end as one line item
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Screen Action            Store Method            Cart Change           │
//! │  ─────────────            ────────────            ───────────           │
//! │                                                                         │
//! │  Tap "Add to Cart" ──────► add_to_cart() ───────► qty + 1 / push       │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► qty = n / remove     │
//! │                                                                         │
//! │  Tap "Remove" ───────────► remove_from_cart() ──► retain(id != ..)     │
//! │                                                                         │
//! │  Checkout ───────────────► take() ──────────────► drain + clear        │
//! │                                                                         │
//! │  After every change: version + 1, watch channel updated (under lock),  │
//! │  then observers called on the mutating thread (lock released).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use storefront_core::{
    Cart, CartLimits, CartLineItem, CartTotals, CoreResult, Money, Product, ProductId,
};
use tokio::sync::watch;

/// A consistent, owned view of the cart at one version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Bumped on every mutation that changed the cart.
    pub version: u64,
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl CartSnapshot {
    fn capture(cart: &Cart, version: u64) -> Self {
        CartSnapshot {
            version,
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }

    /// Total as `Money`.
    pub fn total(&self) -> Money {
        Money::from_cents(self.totals.total_cents)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Receives a snapshot after each cart change.
///
/// Called synchronously on the thread that made the change, after the cart
/// lock is released, so an observer may read the store again. Snapshots
/// from racing writers can arrive out of order; compare `version`.
pub trait CartObserver: Send + Sync {
    fn cart_changed(&self, snapshot: &CartSnapshot);
}

impl<F> CartObserver for F
where
    F: Fn(&CartSnapshot) + Send + Sync,
{
    fn cart_changed(&self, snapshot: &CartSnapshot) {
        self(snapshot)
    }
}

/// Handle returned by [`CartStore::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Inner {
    cart: Cart,
    version: u64,
}

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Arc<dyn CartObserver>)>,
}

/// Session-wide cart state, shared by reference between screens.
///
/// ## Usage
/// ```rust
/// use storefront_app::state::CartStore;
/// use storefront_core::{Money, Product};
///
/// let store = CartStore::default();
/// store.add_to_cart(&Product::new(1, "Backpack", Money::from_cents(1999))).unwrap();
/// store.add_to_cart(&Product::new(1, "Backpack", Money::from_cents(1999))).unwrap();
/// assert_eq!(store.total().to_string(), "$39.98");
/// ```
pub struct CartStore {
    inner: Mutex<Inner>,
    observers: Mutex<Observers>,
    watch_tx: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Creates an empty store enforcing `limits`.
    pub fn new(limits: CartLimits) -> Self {
        let cart = Cart::with_limits(limits);
        let (watch_tx, _) = watch::channel(CartSnapshot::capture(&cart, 0));

        CartStore {
            inner: Mutex::new(Inner { cart, version: 0 }),
            observers: Mutex::new(Observers::default()),
            watch_tx,
        }
    }

    /// Adds one unit of `product`, merging with an existing line item.
    pub fn add_to_cart(&self, product: &Product) -> CoreResult<CartSnapshot> {
        self.mutate(|cart| cart.add(product).map(|_| true))
    }

    /// Removes the line item for `product_id`. Absent ids are a no-op.
    pub fn remove_from_cart(&self, product_id: &ProductId) -> CartSnapshot {
        // remove() cannot fail
        self.mutate(|cart| Ok(cart.remove(product_id)))
            .unwrap_or_else(|_| self.snapshot())
    }

    /// Sets a line item's quantity; 0 removes it, negatives are rejected.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) -> CoreResult<CartSnapshot> {
        self.mutate(|cart| {
            cart.update_quantity(product_id, quantity)
                .map(|outcome| outcome.changed())
        })
    }

    /// Empties the cart. Idempotent.
    pub fn clear_cart(&self) -> CartSnapshot {
        self.mutate(|cart| Ok(cart.clear()))
            .unwrap_or_else(|_| self.snapshot())
    }

    /// Empties the cart and returns what it held, in one step.
    ///
    /// No other mutation can land between the read and the clear.
    pub fn take(&self) -> CartSnapshot {
        let (taken, changed) = {
            let mut inner = self.lock_inner();
            let taken = CartSnapshot::capture(&inner.cart, inner.version);
            let changed = inner.cart.clear();
            (taken, changed.then(|| self.publish(&mut inner)))
        };

        if let Some(snapshot) = changed {
            self.notify(&snapshot);
        }
        taken
    }

    /// Current total, recomputed from the line items.
    pub fn total(&self) -> Money {
        self.lock_inner().cart.total()
    }

    /// Current line items in insertion order.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.lock_inner().cart.items().to_vec()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        let inner = self.lock_inner();
        CartSnapshot::capture(&inner.cart, inner.version)
    }

    /// Returns a receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.watch_tx.subscribe()
    }

    /// Registers an observer called after every change.
    pub fn add_observer(&self, observer: Arc<dyn CartObserver>) -> ObserverId {
        let mut observers = self.lock_observers();
        let id = ObserverId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, observer));
        id
    }

    /// Unregisters an observer. Returns `false` if it was not registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.entries.len();
        observers.entries.retain(|(entry_id, _)| *entry_id != id);
        observers.entries.len() != before
    }

    /// Runs `f` under the cart lock. `f` returns whether the cart changed;
    /// an `Err` means it did not.
    fn mutate<F>(&self, f: F) -> CoreResult<CartSnapshot>
    where
        F: FnOnce(&mut Cart) -> CoreResult<bool>,
    {
        let (snapshot, changed) = {
            let mut inner = self.lock_inner();
            if f(&mut inner.cart)? {
                (self.publish(&mut inner), true)
            } else {
                (CartSnapshot::capture(&inner.cart, inner.version), false)
            }
        };

        if changed {
            self.notify(&snapshot);
        }
        Ok(snapshot)
    }

    /// Bumps the version and updates the watch channel. Caller holds the lock,
    /// so watch receivers see versions in order.
    fn publish(&self, inner: &mut MutexGuard<'_, Inner>) -> CartSnapshot {
        inner.version += 1;
        let snapshot = CartSnapshot::capture(&inner.cart, inner.version);
        self.watch_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn notify(&self, snapshot: &CartSnapshot) {
        // Clone the list so an observer can (un)register without deadlocking
        let observers: Vec<Arc<dyn CartObserver>> = self
            .lock_observers()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer.cart_changed(snapshot);
        }
    }

    // Every cart method leaves the cart valid or untouched, so a poisoned
    // lock still guards a consistent cart.
    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Observers> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(CartLimits::default())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock_inner();
        f.debug_struct("CartStore")
            .field("version", &inner.version)
            .field("items", &inner.cart.item_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_core::ErrorKind;

    fn test_product(id: u64, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    fn counting_observer(store: &CartStore) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        store.add_observer(Arc::new(move |_: &CartSnapshot| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        count
    }

    #[test]
    fn test_store_add_twice() {
        let store = CartStore::default();
        let product = test_product(1, 1999);

        store.add_to_cart(&product).unwrap();
        let snapshot = store.add_to_cart(&product).unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 2);
        assert_eq!(snapshot.totals.total_cents, 3998);
        assert_eq!(snapshot.version, 2);
        assert_eq!(store.total(), Money::from_cents(3998));
    }

    #[test]
    fn test_observers_notified_on_change_only() {
        let store = CartStore::default();
        let count = counting_observer(&store);

        store.add_to_cart(&test_product(1, 100)).unwrap();
        store.remove_from_cart(&ProductId::from(99));
        store.update_quantity(&ProductId::from(99), 3).unwrap();
        store.clear_cart();
        store.clear_cart();

        // add + first clear
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rejected_mutation_does_not_notify() {
        let store = CartStore::default();
        store.add_to_cart(&test_product(1, 100)).unwrap();
        let count = counting_observer(&store);
        let before = store.snapshot();

        let err = store.update_quantity(&ProductId::from(1), -1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_observer_sees_new_state_and_can_read_store() {
        let store = Arc::new(CartStore::default());
        let totals = Arc::new(Mutex::new(Vec::new()));

        let reader = Arc::clone(&store);
        let sink = Arc::clone(&totals);
        store.add_observer(Arc::new(move |snapshot: &CartSnapshot| {
            // Re-entering the store from an observer must not deadlock
            assert_eq!(reader.total(), snapshot.total());
            sink.lock().unwrap().push(snapshot.totals.total_cents);
        }));

        store.add_to_cart(&test_product(1, 1000)).unwrap();
        store.add_to_cart(&test_product(2, 500)).unwrap();
        store.remove_from_cart(&ProductId::from(1));

        assert_eq!(*totals.lock().unwrap(), vec![1000, 1500, 500]);
    }

    #[test]
    fn test_remove_observer() {
        let store = CartStore::default();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let id = store.add_observer(Arc::new(move |_: &CartSnapshot| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        store.add_to_cart(&test_product(1, 100)).unwrap();
        assert!(store.remove_observer(id));
        assert!(!store.remove_observer(id));
        store.add_to_cart(&test_product(1, 100)).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_overflowing_update_leaves_store_usable() {
        let store = CartStore::new(CartLimits {
            max_item_quantity: i64::MAX,
            max_cart_items: 10,
        });
        store.add_to_cart(&test_product(1, 0)).unwrap();
        store.add_to_cart(&test_product(2, 0)).unwrap();
        let before = store.snapshot();

        let err = store
            .update_quantity(&ProductId::from(1), i64::MAX)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(store.snapshot(), before);
        let snapshot = store.add_to_cart(&test_product(3, 100)).unwrap();
        assert_eq!(snapshot.totals.total_quantity, 3);
    }

    #[test]
    fn test_take_drains_cart() {
        let store = CartStore::default();
        store.add_to_cart(&test_product(1, 1000)).unwrap();
        store.add_to_cart(&test_product(2, 500)).unwrap();

        let taken = store.take();

        assert_eq!(taken.items.len(), 2);
        assert_eq!(taken.totals.total_cents, 1500);
        assert!(store.snapshot().is_empty());
        assert_eq!(store.total(), Money::zero());
        assert!(store.take().is_empty());
    }

    #[test]
    fn test_concurrent_adds_merge_into_one_line() {
        let store = Arc::new(CartStore::default());
        let product = test_product(7, 250);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let product = product.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.add_to_cart(&product).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 200);
        assert_eq!(snapshot.totals.total_cents, 250 * 200);
        assert_eq!(snapshot.version, 200);
    }

    #[tokio::test]
    async fn test_subscribe_receives_latest() {
        let store = CartStore::default();
        let mut rx = store.subscribe();
        assert!(rx.borrow().is_empty());

        store.add_to_cart(&test_product(1, 1999)).unwrap();

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.totals.total_cents, 1999);
    }
}
