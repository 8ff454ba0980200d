//! Ponsiv Cart - In-process cart and order module.
//!
//! Accumulates selected products with size and quantity, computes totals, and
//! converts a cart into immutable order records at checkout. The cart lives in
//! a single client context and is mutated synchronously; there is no shared
//! global state, no persistence, and no network access. Callers own a [`Cart`]
//! value and thread it through explicitly.
//!
//! # Line identity
//!
//! Lines are keyed by `(product, size)`: re-adding the same pair increments
//! the quantity of the existing line rather than duplicating it. A line's
//! quantity is always at least 1 - removal, not a zero quantity, is how a
//! line leaves the cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ponsiv_core::{OrderStatus, Price, ProductId};

/// Errors from cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A quantity below 1 was supplied; lines are removed, never zeroed.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// Snapshot of the product fields a cart line needs.
///
/// Captured when the line is added so a later catalog change cannot alter an
/// open cart or a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    /// Catalog id of the product.
    pub id: ProductId,
    /// Brand name at the time the line was added.
    pub brand: String,
    /// Product title at the time the line was added.
    pub title: String,
    /// Unit price at the time the line was added.
    pub price: Price,
}

/// One (product, size) line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product snapshot for this line.
    pub product: CartProduct,
    /// Chosen size.
    pub size: String,
    /// Number of units; always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price x quantity for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price.amount * Decimal::from(self.quantity)
    }
}

/// Immutable order record produced at checkout.
///
/// Never mutated by this module after creation; status transitions belong to
/// an external fulfillment process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Sequential order identifier ("o1", "o2", ...).
    pub id: String,
    /// Catalog id of the ordered product.
    pub product_id: ProductId,
    /// Brand name captured at checkout.
    pub brand: String,
    /// Product title captured at checkout.
    pub title: String,
    /// Chosen size.
    pub size: String,
    /// Unit price captured at checkout.
    pub price: Price,
    /// Number of units ordered.
    pub quantity: u32,
    /// Initial status; always [`OrderStatus::Pending`] at creation.
    pub status: OrderStatus,
    /// Date the order was placed.
    pub date: NaiveDate,
}

/// A user's cart plus the orders it has produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    orders: Vec<Order>,
}

impl Cart {
    /// Create an empty cart with no order history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cart lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Orders produced by previous checkouts, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product` in `size`.
    ///
    /// Increments the existing `(product, size)` line if present, otherwise
    /// inserts a new line with quantity 1.
    pub fn add(&mut self, product: CartProduct, size: impl Into<String>) {
        let size = size.into();
        if let Some(line) = self.line_mut(product.id, &size) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product,
            size,
            quantity: 1,
        });
    }

    /// Set the quantity of the `(product_id, size)` line.
    ///
    /// A missing line is a no-op. A quantity of zero is rejected: removal is
    /// expressed through [`Cart::remove`], never a zeroed line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is below 1.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        size: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }
        if let Some(line) = self.line_mut(product_id, size) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Remove the `(product_id, size)` line; no-op if absent.
    pub fn remove(&mut self, product_id: ProductId, size: &str) {
        self.lines
            .retain(|l| !(l.product.id == product_id && l.size == size));
    }

    /// Sum of price x quantity over all lines.
    ///
    /// Pure function of the current state; an empty cart totals zero.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Convert every line into an order and empty the cart.
    ///
    /// Orders get sequential ids continuing across checkouts, capture the
    /// line's brand/title/size/price, start [`OrderStatus::Pending`], and are
    /// dated today. Both effects - orders appended, cart emptied - happen in
    /// this single synchronous transition.
    ///
    /// Returns the orders created by this checkout.
    pub fn checkout(&mut self) -> &[Order] {
        self.checkout_on(Utc::now().date_naive())
    }

    /// [`Cart::checkout`] with an explicit order date.
    pub fn checkout_on(&mut self, date: NaiveDate) -> &[Order] {
        let first_new = self.orders.len();
        for line in self.lines.drain(..) {
            let id = format!("o{}", self.orders.len() + 1);
            self.orders.push(Order {
                id,
                product_id: line.product.id,
                brand: line.product.brand,
                title: line.product.title,
                size: line.size,
                price: line.product.price,
                quantity: line.quantity,
                status: OrderStatus::Pending,
                date,
            });
        }
        self.orders.get(first_new..).unwrap_or_default()
    }

    fn line_mut(&mut self, product_id: ProductId, size: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product.id == product_id && l.size == size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use ponsiv_core::{CurrencyCode, OrderStatus, Price, ProductId};

    use super::{Cart, CartError, CartProduct};

    fn product(id: i32, cents: i64) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            brand: "Loreak".to_owned(),
            title: format!("Item {id}"),
            price: Price::from_cents(cents, CurrencyCode::EUR),
        }
    }

    #[test]
    fn repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add(product(1, 1000), "M");
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn same_product_different_size_is_a_new_line() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000), "M");
        cart.add(product(1, 1000), "L");

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn total_follows_the_quantity_scenario() {
        // cart = [(A, "M", 10.00)]
        let mut cart = Cart::new();
        cart.add(product(1, 1000), "M");

        cart.add(product(1, 1000), "M");
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::new(2000, 2));

        cart.update_quantity(ProductId::new(1), "M", 5).unwrap();
        assert_eq!(cart.total(), Decimal::new(5000, 2));

        cart.remove(ProductId::new(1), "M");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn add_then_remove_restores_prior_total() {
        let mut cart = Cart::new();
        cart.add(product(1, 2499), "S");
        let before = cart.total();

        cart.add(product(2, 899), "M");
        cart.remove(ProductId::new(2), "M");

        assert_eq!(cart.total(), before);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000), "M");

        let err = cart.update_quantity(ProductId::new(1), "M", 0).unwrap_err();
        assert_eq!(err, CartError::InvalidQuantity);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_of_missing_line_is_a_noop() {
        let mut cart = Cart::new();
        cart.update_quantity(ProductId::new(9), "M", 5).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_of_missing_line_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000), "M");
        cart.remove(ProductId::new(1), "XL");
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn checkout_snapshots_lines_and_empties_cart() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut cart = Cart::new();
        cart.add(product(1, 1000), "M");
        cart.add(product(2, 2550), "L");
        cart.update_quantity(ProductId::new(2), "L", 2).unwrap();

        let new_orders = cart.checkout_on(date).to_vec();

        assert_eq!(new_orders.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        let first = &new_orders[0];
        assert_eq!(first.id, "o1");
        assert_eq!(first.brand, "Loreak");
        assert_eq!(first.size, "M");
        assert_eq!(first.price.amount, Decimal::new(1000, 2));
        assert_eq!(first.status, OrderStatus::Pending);
        assert_eq!(first.date, date);

        assert_eq!(new_orders[1].id, "o2");
        assert_eq!(new_orders[1].quantity, 2);
    }

    #[test]
    fn order_ids_continue_across_checkouts() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut cart = Cart::new();

        cart.add(product(1, 1000), "M");
        cart.checkout_on(date);

        cart.add(product(2, 1000), "S");
        let second = cart.checkout_on(date).to_vec();

        assert_eq!(second[0].id, "o2");
        assert_eq!(cart.orders().len(), 2);
    }

    #[test]
    fn checkout_of_empty_cart_produces_no_orders() {
        let mut cart = Cart::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(cart.checkout_on(date).is_empty());
        assert!(cart.orders().is_empty());
    }
}
