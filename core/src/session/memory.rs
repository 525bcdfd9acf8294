// cartshop/src/session/memory.rs
use super::SessionStore;
use crate::cart::CartState;
use crate::error::SessionError;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Raw contents of a [`MemorySession`].
#[derive(Debug, Default, Clone)]
pub struct SessionData {
  pub values: HashMap<String, Value>,
  /// Set by `mark_dirty`, cleared by the host once it has persisted the session.
  pub modified: bool,
}

/// In-process session with shared ownership, values kept as JSON like a
/// framework session would serialize them.
///
/// Clones share the same underlying data, so a host can keep one handle while
/// a cart mutates through another.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
#[derive(Debug, Default)]
pub struct MemorySession(Arc<RwLock<SessionData>>);

impl MemorySession {
  pub fn new() -> Self {
    Self::default()
  }

  /// Acquires a read lock on the raw session data.
  pub fn read(&self) -> RwLockReadGuard<'_, SessionData> {
    self.0.read()
  }

  /// Acquires a write lock on the raw session data.
  pub fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
    self.0.write()
  }

  pub fn is_modified(&self) -> bool {
    self.read().modified
  }

  /// Called by the host after persisting.
  pub fn reset_modified(&self) {
    self.write().modified = false;
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.read().values.contains_key(key)
  }

  /// Stores an arbitrary raw value, e.g. to simulate a corrupted slot.
  pub fn insert_raw(&self, key: impl Into<String>, value: Value) {
    self.write().values.insert(key.into(), value);
  }
}

impl Clone for MemorySession {
  fn clone(&self) -> Self {
    MemorySession(Arc::clone(&self.0))
  }
}

impl SessionStore for MemorySession {
  fn load(&self, key: &str) -> Result<Option<CartState>, SessionError> {
    let guard = self.read();
    match guard.values.get(key) {
      None => Ok(None),
      Some(value) => serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|source| SessionError::Decode {
          key: key.to_string(),
          source,
        }),
    }
  }

  fn store(&mut self, key: &str, cart: &CartState) -> Result<(), SessionError> {
    let value = serde_json::to_value(cart).map_err(|source| SessionError::Encode {
      key: key.to_string(),
      source,
    })?;
    self.write().values.insert(key.to_string(), value);
    Ok(())
  }

  fn delete(&mut self, key: &str) {
    self.write().values.remove(key);
  }

  fn mark_dirty(&mut self) {
    self.write().modified = true;
  }
}
