//! The session-scoped shopping cart engine.
//!
//! A [`Cart`] is an explicit value: the host loads it from the session once
//! per request, calls exactly one mutation on it, and writes it back only if
//! the mutation succeeded. There is no hidden global state and no fallback
//! code path; this module is the one concrete cart contract.
//!
//! Invariants, upheld by every operation:
//!
//! - at most one line per product id (repeated adds merge into one line)
//! - every stored line has quantity > 0 (a line driven to zero is removed)
//! - `unit_price` is the price snapshot from the *first* add and is never
//!   refreshed by later adds or catalog edits
//! - all money arithmetic is exact decimal

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::product::Product;
use crate::types::ProductId;

/// One product's snapshot plus quantity within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Name snapshot from add time.
    pub name: String,
    /// Price snapshot from add time, insulated from later catalog edits.
    pub unit_price: Decimal,
    /// Units of the product in the cart, always > 0.
    pub quantity: u32,
    /// Image reference snapshot from add time.
    pub image: Option<String>,
}

impl CartLine {
    /// Exact line subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ordered sequence of cart lines, scoped to one session.
///
/// Created empty on the session's first mutation; destroyed (emptied) by
/// successful checkout or explicit clear. It has no existence independent of
/// its owning session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Terminal success marker returned by [`Cart::checkout`].
///
/// Downstream order persistence is deliberately out of scope; the receipt
/// only witnesses the non-empty-to-empty transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    /// The cart total at the moment of checkout.
    pub total: Decimal,
    /// Total units across all lines at the moment of checkout.
    pub item_count: u32,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Add `quantity` units of `product`.
    ///
    /// If a line for the product already exists its quantity is incremented
    /// (saturating) and the original price snapshot is kept; otherwise a new
    /// line is appended snapshotting the product's current price, name and
    /// image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `quantity` is zero.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), Error> {
        if quantity == 0 {
            return Err(Error::invalid("quantity must be a positive integer"));
        }

        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
                image: product.image.clone(),
            });
        }

        Ok(())
    }

    /// Set the quantity of an existing line to exactly `quantity`.
    ///
    /// A quantity of zero behaves as [`Cart::remove_item`] and never errors:
    /// removal of an absent line is a valid no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `quantity > 0` and the cart has no
    /// line for `product_id`.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), Error> {
        if quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(Error::not_found(format!("product {product_id} is not in the cart"))),
        }
    }

    /// Remove the line for `product_id` if present.
    ///
    /// Returns whether a removal occurred, so callers can distinguish
    /// "removed" from "was not in the cart" without treating the latter as
    /// an error.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() < before
    }

    /// Unconditionally empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Exact cart total: Σ `unit_price` × quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// The checkout transition: non-empty → empty, with a success marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCart`] on an empty cart, leaving it unchanged.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, Error> {
        if self.is_empty() {
            return Err(Error::EmptyCart);
        }

        let receipt = CheckoutReceipt {
            total: self.total(),
            item_count: self.item_count(),
        };
        self.lines.clear();
        Ok(receipt)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;
    use std::collections::HashMap;

    use super::*;

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            image: None,
            quantity: 100,
            price: price.parse().unwrap(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_creates_line_with_snapshot() {
        // 3 x 2.50 into an empty cart.
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = cart.lines().first().unwrap();
        assert_eq!(line.product_id, ProductId::new(1));
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, dec("2.50"));
        assert_eq!(cart.total(), dec("7.50"));
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();
        cart.add_item(&product(1, "2.50"), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 5);
        assert_eq!(cart.total(), dec("12.50"));
    }

    #[test]
    fn test_merge_keeps_first_price_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 1).unwrap();
        // Catalog price changed between adds; the snapshot must not move.
        cart.add_item(&product(1, "9.99"), 1).unwrap();

        let line = cart.lines().first().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, dec("2.50"));
        assert_eq!(cart.total(), dec("5.00"));
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&product(1, "2.50"), 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_replaces_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();
        cart.update_quantity(ProductId::new(1), 7).unwrap();
        assert_eq!(cart.lines().first().unwrap().quantity, 7);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();
        cart.update_quantity(ProductId::new(1), 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_line_errors() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();
        assert!(matches!(
            cart.update_quantity(ProductId::new(2), 4),
            Err(Error::NotFound(_))
        ));
        assert_eq!(cart.lines().first().unwrap().quantity, 3);
    }

    #[test]
    fn test_update_missing_line_to_zero_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.update_quantity(ProductId::new(9), 0).is_ok());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_reports_whether_removal_occurred() {
        // Removing an absent line is a valid no-op outcome.
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();

        assert!(!cart.remove_item(ProductId::new(99)));
        assert_eq!(cart.line_count(), 1);

        assert!(cart.remove_item(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_is_unconditional() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item(&product(1, "2.50"), 3).unwrap();
        cart.add_item(&product(2, "0.10"), 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_on_empty_cart_errors_without_transition() {
        let mut cart = Cart::new();
        assert!(matches!(cart.checkout(), Err(Error::EmptyCart)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_empties_cart_and_reports_total() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();
        cart.add_item(&product(2, "0.10"), 2).unwrap();

        let receipt = cart.checkout().unwrap();
        assert_eq!(receipt.total, dec("7.70"));
        assert_eq!(receipt.item_count, 5);
        assert!(cart.is_empty());

        // The cart cycles: it is usable again after checkout.
        cart.add_item(&product(1, "2.50"), 1).unwrap();
        assert_eq!(cart.total(), dec("2.50"));
    }

    #[test]
    fn test_total_has_no_floating_point_drift() {
        // 0.10 added 100 times is exactly 10.00, not 9.99999...
        let mut cart = Cart::new();
        for _ in 0..100 {
            cart.add_item(&product(1, "0.10"), 1).unwrap();
        }
        assert_eq!(cart.total(), dec("10.00"));

        // And the classic 0.1 + 0.2 case.
        let mut cart = Cart::new();
        cart.add_item(&product(1, "0.1"), 1).unwrap();
        cart.add_item(&product(2, "0.2"), 1).unwrap();
        assert_eq!(cart.total(), dec("0.3"));
    }

    #[test]
    fn test_serde_roundtrip_for_session_storage() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "2.50"), 3).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
        assert_eq!(back.total(), dec("7.50"));
    }

    // Property tests: the invariants hold under any interleaving of
    // operations, checked against a naive model.

    #[derive(Debug, Clone)]
    enum Op {
        Add { id: i32, quantity: u32 },
        Update { id: i32, quantity: u32 },
        Remove { id: i32 },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let id = 1..=4i32;
        prop_oneof![
            (id.clone(), 1..6u32).prop_map(|(id, quantity)| Op::Add { id, quantity }),
            (id.clone(), 0..6u32).prop_map(|(id, quantity)| Op::Update { id, quantity }),
            id.prop_map(|id| Op::Remove { id }),
        ]
    }

    fn price_for(id: i32) -> Decimal {
        match id {
            1 => dec("0.10"),
            2 => dec("2.50"),
            3 => dec("19.99"),
            _ => dec("0.01"),
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_under_any_interleaving(
            ops in prop::collection::vec(op_strategy(), 0..50)
        ) {
            let mut cart = Cart::new();
            // Model: product id -> expected quantity.
            let mut model: HashMap<i32, u32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Add { id, quantity } => {
                        cart.add_item(&product(id, &price_for(id).to_string()), quantity)
                            .unwrap();
                        *model.entry(id).or_insert(0) += quantity;
                    }
                    Op::Update { id, quantity } => {
                        let result = cart.update_quantity(ProductId::new(id), quantity);
                        if quantity == 0 {
                            prop_assert!(result.is_ok());
                            model.remove(&id);
                        } else if model.contains_key(&id) {
                            prop_assert!(result.is_ok());
                            model.insert(id, quantity);
                        } else {
                            prop_assert!(matches!(result, Err(Error::NotFound(_))));
                        }
                    }
                    Op::Remove { id } => {
                        let removed = cart.remove_item(ProductId::new(id));
                        prop_assert_eq!(removed, model.remove(&id).is_some());
                    }
                }

                // One line per product id.
                let mut seen = std::collections::HashSet::new();
                for line in cart.lines() {
                    prop_assert!(seen.insert(line.product_id), "duplicate line");
                    // No reachable state holds a non-positive quantity.
                    prop_assert!(line.quantity > 0);
                }

                // Quantities and exact total match the model.
                prop_assert_eq!(cart.line_count(), model.len());
                let expected_total: Decimal = model
                    .iter()
                    .map(|(id, quantity)| price_for(*id) * Decimal::from(*quantity))
                    .sum();
                prop_assert_eq!(cart.total(), expected_total);
            }
        }
    }
}
