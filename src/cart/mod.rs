//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::round_money;

mod line_item;

pub use line_item::LineItem;

/// Clamp a requested quantity to the range a stored line item accepts (`1..=u32::MAX`).
#[must_use]
pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// Ordered list of line items, unique by product id.
///
/// Every stored line item has a quantity of at least 1. The cart is a plain value: callers load
/// it, mutate it, and hand it back to a store to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw line items, restoring the cart invariants.
    ///
    /// Lines with a zero quantity or a negative price are dropped, and lines repeating an id are
    /// merged into the first line with that id.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            if item.quantity == 0 || item.price.is_sign_negative() {
                continue;
            }

            match cart.get_mut(&item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Add one unit of a product, returning the new quantity of its line.
    ///
    /// An existing line keeps its original title and price snapshot.
    pub fn add(&mut self, id: &str, title: &str, price: Decimal) -> u32 {
        self.add_units(id, title, price, 1)
    }

    /// Add `units` of a product (at least one), returning the new quantity of its line.
    ///
    /// Quantities saturate at `u32::MAX`. An existing line keeps its original title and price
    /// snapshot.
    pub fn add_units(&mut self, id: &str, title: &str, price: Decimal, units: u32) -> u32 {
        let units = units.max(1);

        if let Some(existing) = self.get_mut(id) {
            existing.quantity = existing.quantity.saturating_add(units);

            return existing.quantity;
        }

        let mut item = LineItem::new(id, title, price);
        item.quantity = units;
        self.items.push(item);

        units
    }

    /// Remove the line with the given id, returning whether a line was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.id != id);

        self.items.len() != before
    }

    /// Set the quantity of a line, clamped to at least 1.
    ///
    /// Returns the stored quantity, or `None` when the cart has no line with that id.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Option<u32> {
        let item = self.get_mut(id)?;

        item.quantity = clamp_quantity(quantity);

        Some(item.quantity)
    }

    /// Change the quantity of a line by `delta`, clamped to at least 1.
    ///
    /// Returns the stored quantity, or `None` when the cart has no line with that id.
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) -> Option<u32> {
        let current = i64::from(self.get(id)?.quantity);

        self.set_quantity(id, current.saturating_add(delta))
    }

    /// Get the line with the given id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line subtotals, rounded to two decimal places.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        round_money(
            self.items
                .iter()
                .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal())),
        )
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
