// cartshop/src/session/mod.rs

//! The slice of a client session the cart depends on.
//!
//! A session is an external, per-client key-value store that outlives one
//! request. The cart reads one slot at construction, writes it back after
//! each mutation and then signals the host that the session must be persisted.

pub mod memory;

pub use memory::MemorySession;

use crate::cart::CartState;
use crate::error::SessionError;

/// Session key used when the host does not configure one.
pub const DEFAULT_CART_SESSION_KEY: &str = "cart";

pub trait SessionStore {
  /// Reads the cart mapping under `key`, `Ok(None)` when the slot is empty.
  fn load(&self, key: &str) -> Result<Option<CartState>, SessionError>;

  /// Replaces the value under `key`.
  fn store(&mut self, key: &str, cart: &CartState) -> Result<(), SessionError>;

  /// Drops the slot entirely. Deleting a missing key is not an error.
  fn delete(&mut self, key: &str);

  /// Tells the host the session changed and must be saved at the end of the request.
  fn mark_dirty(&mut self);
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
  fn load(&self, key: &str) -> Result<Option<CartState>, SessionError> {
    (**self).load(key)
  }

  fn store(&mut self, key: &str, cart: &CartState) -> Result<(), SessionError> {
    (**self).store(key, cart)
  }

  fn delete(&mut self, key: &str) {
    (**self).delete(key)
  }

  fn mark_dirty(&mut self) {
    (**self).mark_dirty()
  }
}
