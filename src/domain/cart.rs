use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shopping cart kept in the session: product id mapped to requested quantity.
///
/// Quantities are always positive; setting a line to zero or below removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<i32, i32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity currently held for `product_id`, zero when absent.
    pub fn quantity(&self, product_id: i32) -> i32 {
        self.lines.get(&product_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, product_id: i32) -> bool {
        self.lines.contains_key(&product_id)
    }

    /// Increase the quantity of `product_id` by `quantity`.
    pub fn add(&mut self, product_id: i32, quantity: i32) {
        if quantity <= 0 {
            return;
        }
        let entry = self.lines.entry(product_id).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Replace the quantity of `product_id`; non-positive quantities drop the line.
    pub fn set(&mut self, product_id: i32, quantity: i32) {
        if quantity <= 0 {
            self.lines.remove(&product_id);
        } else {
            self.lines.insert(product_id, quantity);
        }
    }

    /// Drop the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: i32) -> bool {
        self.lines.remove(&product_id).is_some()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all quantities, shown as the cart badge.
    pub fn total_quantity(&self) -> i64 {
        self.lines.values().map(|quantity| i64::from(*quantity)).sum()
    }

    pub fn product_ids(&self) -> Vec<i32> {
        self.lines.keys().copied().collect()
    }

    /// Lines as `(product_id, quantity)` in product id order.
    pub fn lines(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.lines.iter().map(|(id, quantity)| (*id, *quantity))
    }
}
