// cartshop/src/cart/entry.rs

use super::line::CartLine;
use crate::money;
use rust_decimal::Decimal;
use serde::Serialize;

/// A cart line joined with its resolved catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry<P> {
  pub product: P,
  pub quantity: u32,
  /// Snapshot taken when the product was first added, not the live price.
  pub unit_price: Decimal,
  /// Exact; rounded to cents only when serialized.
  #[serde(serialize_with = "money::serialize_rounded")]
  pub total_price: Decimal,
}

impl<P> CartEntry<P> {
  pub fn new(product: P, line: &CartLine) -> Self {
    Self {
      product,
      quantity: line.quantity.get(),
      unit_price: line.unit_price,
      total_price: money::exact(line.total_price()),
    }
  }
}

/// Everything the cart detail view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartDetails<P> {
  pub products: Vec<CartEntry<P>>,
  #[serde(serialize_with = "money::serialize_rounded")]
  pub total_price: Decimal,
}

impl<P> CartDetails<P> {
  /// Sums the exact line totals of the given entries, so the listed lines
  /// and the reported total always agree.
  pub fn from_entries(products: Vec<CartEntry<P>>) -> Self {
    let total_price = money::sum(products.iter().map(|entry| entry.total_price));
    Self { products, total_price }
  }

  pub fn total_quantity(&self) -> u64 {
    self.products.iter().map(|entry| u64::from(entry.quantity)).sum()
  }
}

impl<P> Default for CartDetails<P> {
  fn default() -> Self {
    Self::from_entries(Vec::new())
  }
}
