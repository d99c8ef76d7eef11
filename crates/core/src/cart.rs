//! Shopping cart.
//!
//! The cart is an ordered list of lines. It is purely in-memory; callers
//! persist it after every mutation (see [`crate::storage::snapshots`]).

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::Price;

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: NonZeroU32,
    /// Free-text notes; empty means none.
    #[serde(default)]
    pub notes: String,
}

impl CartLine {
    /// Price of this line (`price × quantity`).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price().times(self.quantity.get())
    }
}

/// The visitor's cart.
///
/// Lines are unique by product id and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` of `product`.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `quantity`, and its notes are replaced only when `notes` is
    /// non-empty. Otherwise a new line is appended.
    pub fn add(&mut self, product: Product, quantity: NonZeroU32, notes: impl Into<String>) {
        let notes = notes.into();
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id() == product.id())
        {
            line.quantity = line.quantity.saturating_add(quantity.get());
            if !notes.is_empty() {
                line.notes = notes;
            }
            return;
        }
        self.lines.push(CartLine {
            product,
            quantity,
            notes,
        });
    }

    /// Remove the line at `index`.
    ///
    /// Returns `None` and leaves the cart unchanged if `index` is out of
    /// bounds.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Set the quantity of the line at `index`, clamped to at least 1.
    ///
    /// Returns `false` if `index` is out of bounds.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        let clamped = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        line.quantity = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
