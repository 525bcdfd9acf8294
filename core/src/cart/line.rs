// cartshop/src/cart/line.rs

use crate::money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Identifier of a catalog product. The cart does not own products, it only
/// refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
  pub fn get(self) -> i64 {
    self.0
  }
}

impl From<i64> for ProductId {
  fn from(id: i64) -> Self {
    ProductId(id)
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// One product's quantity and the unit price captured when it was first added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub quantity: NonZeroU32,
  #[serde(rename = "price")]
  pub unit_price: Decimal,
}

impl CartLine {
  pub fn new(quantity: NonZeroU32, unit_price: Decimal) -> Self {
    Self { quantity, unit_price }
  }

  pub fn total_price(&self) -> Decimal {
    money::line_total(self.quantity.get(), self.unit_price)
  }

  /// Adds `extra` units. Saturates at `u32::MAX` instead of wrapping.
  pub(crate) fn merge(&mut self, extra: NonZeroU32) {
    self.quantity = self.quantity.saturating_add(extra.get());
  }
}
