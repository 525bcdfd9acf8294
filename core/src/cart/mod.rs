// cartshop/src/cart/mod.rs

//! The session-backed cart aggregate.
//!
//! A [`Cart`] is built for one request from the client's session, performs a
//! mutation or a read, and is dropped. Every mutation writes the whole mapping
//! back to the session and marks it dirty so the host persists it. There is no
//! locking across requests: two concurrent requests on one session race and
//! the last write wins.

mod entry;
mod line;
mod state;

pub use entry::{CartDetails, CartEntry};
pub use line::{CartLine, ProductId};
pub use state::CartState;

use crate::catalog::{Priced, ProductLookup};
use crate::error::CartResult;
use crate::session::{SessionStore, DEFAULT_CART_SESSION_KEY};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::num::NonZeroU32;
use tracing::{debug, error, instrument, warn};

#[derive(Debug)]
pub struct Cart<S: SessionStore> {
  session: S,
  key: String,
  state: CartState,
}

impl<S: SessionStore> Cart<S> {
  /// Binds to `session` under [`DEFAULT_CART_SESSION_KEY`].
  pub fn new(session: S) -> Self {
    Self::with_key(session, DEFAULT_CART_SESSION_KEY)
  }

  /// Binds to `session`, loading the mapping under `key`.
  ///
  /// A missing slot is initialized to an empty mapping and written back
  /// right away. A slot that cannot be decoded is logged and replaced the
  /// same way. Construction itself never fails: if the initial write is
  /// rejected the cart still works in memory and the next mutation retries.
  pub fn with_key(mut session: S, key: impl Into<String>) -> Self {
    let key = key.into();
    let state = match session.load(&key) {
      Ok(Some(state)) => return Self { session, key, state },
      Ok(None) => CartState::new(),
      Err(err) => {
        warn!(session_key = %key, error = %err, "Discarding undecodable cart from session.");
        CartState::new()
      }
    };

    if let Err(err) = session.store(&key, &state) {
      error!(session_key = %key, error = %err, "Failed to initialize cart in session.");
    }
    Self { session, key, state }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Adds `quantity` units of `product`.
  ///
  /// The first add for a product captures `product.price()` as the line's
  /// unit price; later adds never touch it. With `replace_quantity` the line's
  /// quantity is overwritten, otherwise it is incremented.
  #[instrument(name = "cart::add", skip(self, product), fields(product_id = %product.id()), err(Display))]
  pub fn add<P: Priced + ?Sized>(&mut self, product: &P, quantity: NonZeroU32, replace_quantity: bool) -> CartResult<()> {
    let (line, inserted) = self
      .state
      .entry_or_insert(product.id(), CartLine::new(quantity, product.price()));
    if !inserted {
      if replace_quantity {
        line.quantity = quantity;
      } else {
        line.merge(quantity);
      }
    }
    debug!(line_quantity = line.quantity.get(), unit_price = %line.unit_price, inserted, "Cart line updated.");
    self.save()
  }

  /// `add(product, 1, false)`.
  pub fn add_one<P: Priced + ?Sized>(&mut self, product: &P) -> CartResult<()> {
    self.add(product, NonZeroU32::MIN, false)
  }

  /// Removes the product's line. Returns whether a line was removed; the
  /// session is only marked dirty when it was.
  pub fn remove<P: Priced + ?Sized>(&mut self, product: &P) -> CartResult<bool> {
    self.remove_id(product.id())
  }

  #[instrument(name = "cart::remove", skip(self), err(Display))]
  pub fn remove_id(&mut self, product_id: ProductId) -> CartResult<bool> {
    if self.state.remove(product_id).is_none() {
      debug!("No cart line to remove.");
      return Ok(false);
    }
    self.save()?;
    Ok(true)
  }

  /// Deletes the whole mapping from the session.
  ///
  /// The instance stays usable: it now reads as empty, and the next mutation
  /// writes a fresh mapping under the same key.
  #[instrument(name = "cart::clear", skip(self), fields(session_key = %self.key))]
  pub fn clear(&mut self) {
    self.session.delete(&self.key);
    self.session.mark_dirty();
    self.state = CartState::new();
  }

  /// Stored lines in insertion order. Each call starts a fresh pass over the mapping.
  pub fn lines(&self) -> impl Iterator<Item = (ProductId, &CartLine)> + '_ {
    self.state.iter()
  }

  pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
    self.state.get(product_id)
  }

  /// Number of distinct products.
  pub fn len(&self) -> usize {
    self.state.len()
  }

  pub fn is_empty(&self) -> bool {
    self.state.is_empty()
  }

  /// Sum of quantities over all lines.
  pub fn total_quantity(&self) -> u64 {
    self.state.total_quantity()
  }

  /// Exact sum of `quantity * unit_price`, padded to at least two decimal
  /// places and never rounded.
  pub fn total_price(&self) -> Decimal {
    self.state.total_price()
  }

  /// Resolves every line's product with a single batch lookup and joins it
  /// with the stored quantity and price snapshot, in cart order.
  ///
  /// Lines whose product no longer resolves are skipped and logged. They stay
  /// in the session untouched.
  #[instrument(name = "cart::entries", skip(self, lookup), fields(lines = self.state.len()), err(Display))]
  pub async fn entries<L>(&self, lookup: &L) -> CartResult<Vec<CartEntry<L::Product>>>
  where
    L: ProductLookup + ?Sized,
  {
    if self.state.is_empty() {
      return Ok(Vec::new());
    }

    let ids = self.state.ids();
    let mut resolved: HashMap<ProductId, L::Product> = lookup
      .products_by_ids(&ids)
      .await?
      .into_iter()
      .map(|product| (product.id(), product))
      .collect();

    let mut entries = Vec::with_capacity(self.state.len());
    for (product_id, line) in self.state.iter() {
      match resolved.remove(&product_id) {
        Some(product) => entries.push(CartEntry::new(product, line)),
        None => warn!(%product_id, "Cart line refers to a product that no longer exists; skipping."),
      }
    }
    Ok(entries)
  }

  /// [`entries`](Self::entries) plus their total.
  pub async fn details<L>(&self, lookup: &L) -> CartResult<CartDetails<L::Product>>
  where
    L: ProductLookup + ?Sized,
  {
    Ok(CartDetails::from_entries(self.entries(lookup).await?))
  }

  fn save(&mut self) -> CartResult<()> {
    self.session.store(&self.key, &self.state)?;
    self.session.mark_dirty();
    Ok(())
  }
}

impl<'a, S: SessionStore> IntoIterator for &'a Cart<S> {
  type Item = (ProductId, &'a CartLine);
  type IntoIter = Box<dyn Iterator<Item = (ProductId, &'a CartLine)> + 'a>;

  fn into_iter(self) -> Self::IntoIter {
    Box::new(self.lines())
  }
}
