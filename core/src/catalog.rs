// cartshop/src/catalog.rs

//! Contracts the cart needs from the product catalog.
//!
//! The cart never talks to a database. Callers hand it already-resolved
//! products for mutations, and a [`ProductLookup`] for enriching lines.

use crate::cart::ProductId;
use crate::error::LookupError;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// A catalog product as seen by the cart: an identity and a current price.
pub trait Priced {
  fn id(&self) -> ProductId;
  fn price(&self) -> Decimal;
}

impl<T: Priced + ?Sized> Priced for &T {
  fn id(&self) -> ProductId {
    (**self).id()
  }

  fn price(&self) -> Decimal {
    (**self).price()
  }
}

/// Batch product resolution.
///
/// Implementations must answer for all ids in one round trip. Ids that no
/// longer resolve are left out of the result rather than reported as errors.
#[async_trait]
pub trait ProductLookup: Send + Sync {
  type Product: Priced + Send;

  async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Self::Product>, LookupError>;
}
