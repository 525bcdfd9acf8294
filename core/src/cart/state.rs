// cartshop/src/cart/state.rs

use super::line::{CartLine, ProductId};
use crate::money;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The value stored in the session: product id to line, in insertion order.
///
/// Encoded as a JSON object keyed by the product id string, e.g.
/// `{"7": {"quantity": 2, "price": "13.99"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
  lines: IndexMap<ProductId, CartLine>,
}

impl CartState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn get(&self, id: ProductId) -> Option<&CartLine> {
    self.lines.get(&id)
  }

  pub fn iter(&self) -> impl Iterator<Item = (ProductId, &CartLine)> + '_ {
    self.lines.iter().map(|(id, line)| (*id, line))
  }

  pub fn ids(&self) -> Vec<ProductId> {
    self.lines.keys().copied().collect()
  }

  pub fn total_quantity(&self) -> u64 {
    self.lines.values().map(|line| u64::from(line.quantity.get())).sum()
  }

  /// Exact, with at least two fractional digits.
  pub fn total_price(&self) -> Decimal {
    money::sum(self.lines.values().map(CartLine::total_price))
  }

  pub(crate) fn entry_or_insert(&mut self, id: ProductId, line: CartLine) -> (&mut CartLine, bool) {
    let inserted = !self.lines.contains_key(&id);
    (self.lines.entry(id).or_insert(line), inserted)
  }

  /// Keeps the relative order of the remaining lines.
  pub(crate) fn remove(&mut self, id: ProductId) -> Option<CartLine> {
    self.lines.shift_remove(&id)
  }
}

impl FromIterator<(ProductId, CartLine)> for CartState {
  fn from_iter<I: IntoIterator<Item = (ProductId, CartLine)>>(iter: I) -> Self {
    Self {
      lines: iter.into_iter().collect(),
    }
  }
}
