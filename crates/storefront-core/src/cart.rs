//! # Cart Module
//!
//! The cart aggregate: an ordered list of line items, unique by product id.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations                                       │
//! │                                                                         │
//! │  add(product)                                                           │
//! │    ├── id present? ──► items[i].quantity += 1   (position kept)         │
//! │    └── id absent?  ──► items.push(item, qty 1)  (appended)              │
//! │                                                                         │
//! │  remove(id)            ──► items.retain(id != ..)  (absent = no-op)     │
//! │                                                                         │
//! │  update_quantity(id, n)                                                 │
//! │    ├── n > 0   ──► items[i].quantity = n                                │
//! │    ├── n == 0  ──► same as remove(id)                                   │
//! │    └── n < 0   ──► InvalidArgument, nothing changes                     │
//! │                                                                         │
//! │  clear()               ──► items.clear()  (idempotent)                  │
//! │                                                                         │
//! │  total()               ──► Σ unit_price × quantity, computed on read    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id
//! - Every quantity is in `1..=limits.max_item_quantity`
//! - Insertion order is kept across quantity changes
//! - `total()` and `total_quantity()` never overflow (checked before any
//!   mutation lands)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::validate_product;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Limits
// =============================================================================

/// Upper bounds enforced on every cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLimits {
    /// Largest quantity a single line item may hold.
    pub max_item_quantity: i64,

    /// Largest number of distinct line items.
    pub max_cart_items: usize,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_item_quantity: MAX_ITEM_QUANTITY,
            max_cart_items: MAX_CART_ITEMS,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart entry: a product's identifying fields plus an aggregated quantity.
///
/// The title, image, and price are frozen copies taken when the product was
/// first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub title: String,
    pub image: String,
    pub unit_price: Money,
    /// Always >= 1.
    pub quantity: i64,
}

impl CartLineItem {
    /// Creates a line item with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartLineItem {
            product_id: product.id.clone(),
            title: product.title.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What `update_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The line item now has the requested quantity.
    Updated,
    /// Quantity 0 was requested, so the line item was dropped.
    Removed,
    /// No line item with that id; nothing changed.
    NotInCart,
}

impl UpdateOutcome {
    /// Whether the cart contents changed.
    pub fn changed(&self) -> bool {
        !matches!(self, UpdateOutcome::NotInCart)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// Line items are private; the only way to change them is through the
/// methods below, each of which either fully applies or leaves the cart as
/// it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
    limits: CartLimits,
}

impl Cart {
    /// Creates a new empty cart with default limits.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Creates a new empty cart with the given limits.
    pub fn with_limits(limits: CartLimits) -> Self {
        Cart {
            items: Vec::new(),
            limits,
        }
    }

    /// Returns the limits this cart enforces.
    pub fn limits(&self) -> CartLimits {
        self.limits
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, position unchanged
    /// - Product not in cart: appended with quantity 1
    ///
    /// ## Returns
    /// The line item's quantity after the add.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, Money, Product};
    ///
    /// let mut cart = Cart::new();
    /// let product = Product::new(1, "Backpack", Money::from_cents(1999));
    ///
    /// assert_eq!(cart.add(&product).unwrap(), 1);
    /// assert_eq!(cart.add(&product).unwrap(), 2);
    /// assert_eq!(cart.total(), Money::from_cents(3998));
    /// ```
    pub fn add(&mut self, product: &Product) -> CoreResult<i64> {
        validate_product(product)?;

        match self.position(&product.id) {
            Some(index) => {
                let new_qty = self.items[index]
                    .quantity
                    .checked_add(1)
                    .filter(|qty| *qty <= self.limits.max_item_quantity)
                    .ok_or(CoreError::QuantityTooLarge {
                        requested: self.items[index].quantity.saturating_add(1),
                        max: self.limits.max_item_quantity,
                    })?;
                self.ensure_totals_fit(Some(index), self.items[index].unit_price, new_qty)?;
                self.items[index].quantity = new_qty;
                Ok(new_qty)
            }
            None => {
                if self.items.len() >= self.limits.max_cart_items {
                    return Err(CoreError::CartTooLarge {
                        max: self.limits.max_cart_items,
                    });
                }
                self.ensure_totals_fit(None, product.price, 1)?;
                self.items.push(CartLineItem::from_product(product));
                Ok(1)
            }
        }
    }

    /// Removes the line item for `product_id`.
    ///
    /// Returns `true` if a line item was removed; an absent id is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of the line item for `product_id`.
    ///
    /// ## Behavior
    /// - `quantity < 0`: rejected, cart unchanged
    /// - `quantity == 0`: line item removed
    /// - `quantity > max_item_quantity`: rejected, cart unchanged
    /// - id not in cart: no-op
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> CoreResult<UpdateOutcome> {
        if quantity < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        let Some(index) = self.position(product_id) else {
            return Ok(UpdateOutcome::NotInCart);
        };

        if quantity == 0 {
            self.items.remove(index);
            return Ok(UpdateOutcome::Removed);
        }

        if quantity > self.limits.max_item_quantity {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: self.limits.max_item_quantity,
            });
        }
        self.ensure_totals_fit(Some(index), self.items[index].unit_price, quantity)?;

        self.items[index].quantity = quantity;
        Ok(UpdateOutcome::Updated)
    }

    /// Clears all items from the cart.
    ///
    /// Returns `true` if the cart had items.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line item for `product_id`.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Returns the number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Σ unit_price × quantity over all line items, recomputed on each call.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    fn lines_except(&self, index: Option<usize>) -> impl Iterator<Item = &CartLineItem> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != index)
            .map(|(_, item)| item)
    }

    /// Verifies the cart total and total quantity still fit in an i64 if the
    /// line at `index` (or a new line when `None`) had `price × qty`.
    fn ensure_totals_fit(&self, index: Option<usize>, price: Money, qty: i64) -> CoreResult<()> {
        let overflow = |field: &str| {
            CoreError::from(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: i64::MAX,
            })
        };

        let candidate = price
            .checked_mul_quantity(qty)
            .ok_or_else(|| overflow("cart total"))?;
        self.lines_except(index)
            .try_fold(candidate, |acc, item| {
                item.unit_price
                    .checked_mul_quantity(item.quantity)
                    .and_then(|line| acc.checked_add(line))
            })
            .ok_or_else(|| overflow("cart total"))?;

        self.lines_except(index)
            .try_fold(qty, |acc, item| acc.checked_add(item.quantity))
            .ok_or_else(|| overflow("cart quantity"))?;

        Ok(())
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn test_product(id: u64, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.items().iter().map(|i| i.product_id.as_str()).collect()
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut cart = Cart::new();
        let product = test_product(1, 1999);

        cart.add(&product).unwrap();
        cart.add(&product).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), Money::from_cents(3998));
        assert_eq!(cart.total().to_string(), "$39.98");
    }

    #[test]
    fn test_add_two_then_remove_first() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1000)).unwrap();
        cart.add(&test_product(2, 500)).unwrap();

        assert!(cart.remove(&ProductId::from(1)));

        assert_eq!(ids(&cart), vec!["2"]);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total(), Money::from_cents(500));
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1000)).unwrap();

        let outcome = cart.update_quantity(&ProductId::from(1), 5).unwrap();

        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total(), Money::from_cents(5000));
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(&ProductId::from(99)));
        assert_eq!(cart, Cart::new());
    }

    #[test]
    fn test_add_keeps_position() {
        let mut cart = Cart::new();
        let a = test_product(1, 100);
        let b = test_product(2, 200);
        let c = test_product(3, 300);

        cart.add(&a).unwrap();
        cart.add(&b).unwrap();
        cart.add(&c).unwrap();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();

        assert_eq!(ids(&cart), vec!["1", "2", "3"]);
        assert_eq!(cart.get(&ProductId::from(1)).unwrap().quantity, 2);
        assert_eq!(cart.get(&ProductId::from(3)).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 100)).unwrap();
        cart.add(&test_product(2, 200)).unwrap();

        let outcome = cart.update_quantity(&ProductId::from(1), 0).unwrap();

        assert_eq!(outcome, UpdateOutcome::Removed);
        assert_eq!(ids(&cart), vec!["2"]);
    }

    #[test]
    fn test_update_negative_is_rejected() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 100)).unwrap();
        let before = cart.clone();

        let err = cart.update_quantity(&ProductId::from(1), -3).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 100)).unwrap();

        let outcome = cart.update_quantity(&ProductId::from(7), 4).unwrap();

        assert_eq!(outcome, UpdateOutcome::NotInCart);
        assert!(!outcome.changed());
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_product() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 100)).unwrap();
        let before = cart.clone();

        let no_id = Product::new("", "Nameless", Money::from_cents(100));
        let err = cart.add(&no_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let negative = Product::new(2, "Refund?", Money::from_cents(-100));
        assert!(cart.add(&negative).is_err());

        assert_eq!(cart, before);
    }

    #[test]
    fn test_limits_are_enforced() {
        let mut cart = Cart::with_limits(CartLimits {
            max_item_quantity: 2,
            max_cart_items: 1,
        });
        let product = test_product(1, 100);

        cart.add(&product).unwrap();
        cart.add(&product).unwrap();
        assert!(matches!(
            cart.add(&product),
            Err(CoreError::QuantityTooLarge { requested: 3, max: 2 })
        ));
        assert!(matches!(
            cart.add(&test_product(2, 100)),
            Err(CoreError::CartTooLarge { max: 1 })
        ));
        assert!(cart.update_quantity(&ProductId::from(1), 3).is_err());

        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, i64::MAX / 2)).unwrap();
        let before = cart.clone();

        let err = cart.update_quantity(&ProductId::from(1), 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(cart.add(&test_product(2, i64::MAX / 2 + 10)).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_quantity_overflow_with_unbounded_limits() {
        let mut cart = Cart::with_limits(CartLimits {
            max_item_quantity: i64::MAX,
            max_cart_items: MAX_CART_ITEMS,
        });
        cart.add(&test_product(1, 0)).unwrap();
        cart.add(&test_product(2, 0)).unwrap();
        let before = cart.clone();

        let err = cart
            .update_quantity(&ProductId::from(1), i64::MAX)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(cart, before);
        assert_eq!(CartTotals::from(&cart).total_quantity, 2);

        // the other line alone may take the whole range
        cart.remove(&ProductId::from(2));
        cart.update_quantity(&ProductId::from(1), i64::MAX).unwrap();
        assert!(matches!(
            cart.add(&test_product(1, 0)),
            Err(CoreError::QuantityTooLarge { max: i64::MAX, .. })
        ));
        assert_eq!(cart.total_quantity(), i64::MAX);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 100)).unwrap();

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert!(!cart.clear());
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1999)).unwrap();
        cart.add(&test_product(1, 1999)).unwrap();
        cart.add(&test_product(2, 500)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(
            totals,
            CartTotals {
                item_count: 2,
                total_quantity: 3,
                total_cents: 4498,
            }
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u64),
            Remove(u64),
            Update(u64, i64),
            Clear,
        }

        // Small id space so operations collide often
        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (0u64..6).prop_map(Op::Add),
                2 => (0u64..6).prop_map(Op::Remove),
                2 => ((0u64..6), (-2i64..20)).prop_map(|(id, q)| Op::Update(id, q)),
                1 => Just(Op::Clear),
            ]
        }

        fn price_of(id: u64) -> i64 {
            (id as i64 + 1) * 1999
        }

        fn apply(cart: &mut Cart, op: &Op) {
            match op {
                Op::Add(id) => {
                    cart.add(&test_product(*id, price_of(*id))).unwrap();
                }
                Op::Remove(id) => {
                    cart.remove(&ProductId::from(*id));
                }
                Op::Update(id, q) => {
                    let _ = cart.update_quantity(&ProductId::from(*id), *q);
                }
                Op::Clear => {
                    cart.clear();
                }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: at most one line item per id, every quantity positive.
            #[test]
            fn ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..60)) {
                let mut cart = Cart::new();
                for op in &ops {
                    apply(&mut cart, op);
                    let mut seen = HashSet::new();
                    for item in cart.items() {
                        prop_assert!(seen.insert(item.product_id.clone()));
                        prop_assert!(item.quantity >= 1);
                    }
                }
            }

            /// Property: total equals an independent Σ price × quantity.
            #[test]
            fn total_matches_recomputation(ops in prop::collection::vec(op_strategy(), 0..60)) {
                let mut cart = Cart::new();
                for op in &ops {
                    apply(&mut cart, op);
                    let expected: i64 = cart
                        .items()
                        .iter()
                        .map(|i| i.unit_price.cents() * i.quantity)
                        .sum();
                    prop_assert_eq!(cart.total().cents(), expected);
                }
            }

            /// Property: adding the same product N times yields quantity N.
            #[test]
            fn repeated_adds_accumulate(n in 1i64..200) {
                let mut cart = Cart::new();
                let product = test_product(42, 250);
                for _ in 0..n {
                    cart.add(&product).unwrap();
                }
                prop_assert_eq!(cart.item_count(), 1);
                prop_assert_eq!(cart.items()[0].quantity, n);
                prop_assert_eq!(cart.total().cents(), 250 * n);
            }

            /// Property: re-adding a present product never reorders the cart.
            #[test]
            fn re_add_keeps_order(
                first in prop::collection::vec(0u64..10, 1..10),
                again in 0usize..10,
            ) {
                let mut cart = Cart::new();
                for id in &first {
                    cart.add(&test_product(*id, price_of(*id))).unwrap();
                }
                let order_before: Vec<ProductId> =
                    cart.items().iter().map(|i| i.product_id.clone()).collect();

                let id = first[again % first.len()];
                cart.add(&test_product(id, price_of(id))).unwrap();

                let order_after: Vec<ProductId> =
                    cart.items().iter().map(|i| i.product_id.clone()).collect();
                prop_assert_eq!(order_before, order_after);
            }

            /// Property: remove drops the item and exactly its contribution.
            #[test]
            fn remove_is_complete(
                ops in prop::collection::vec(op_strategy(), 0..40),
                target in 0u64..6,
            ) {
                let mut cart = Cart::new();
                for op in &ops {
                    apply(&mut cart, op);
                }
                let id = ProductId::from(target);
                let contribution = cart
                    .get(&id)
                    .map(CartLineItem::line_total)
                    .unwrap_or_default();
                let before = cart.total();

                cart.remove(&id);

                prop_assert!(cart.get(&id).is_none());
                prop_assert_eq!(cart.total(), before - contribution);
            }
        }
    }
}
