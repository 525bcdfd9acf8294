// shop_api/src/services/cart_session.rs

//! Binds the cart to the actix cookie session.

use actix_session::Session;
use cartshop::{CartState, SessionError, SessionStore};

/// [`SessionStore`] over the request's [`Session`].
///
/// `insert` and `remove` already flag the session as changed, so the
/// middleware rewrites the cookie without an explicit dirty call.
pub struct CartSession<'a> {
  session: &'a Session,
}

impl<'a> CartSession<'a> {
  pub fn new(session: &'a Session) -> Self {
    Self { session }
  }
}

impl SessionStore for CartSession<'_> {
  fn load(&self, key: &str) -> Result<Option<CartState>, SessionError> {
    let raw: Option<serde_json::Value> = self
      .session
      .get(key)
      .map_err(|e| SessionError::Backend(e.to_string()))?;
    raw
      .map(|value| {
        serde_json::from_value(value).map_err(|source| SessionError::Decode {
          key: key.to_string(),
          source,
        })
      })
      .transpose()
  }

  fn store(&mut self, key: &str, cart: &CartState) -> Result<(), SessionError> {
    let value = serde_json::to_value(cart).map_err(|source| SessionError::Encode {
      key: key.to_string(),
      source,
    })?;
    self
      .session
      .insert(key, value)
      .map_err(|e| SessionError::Backend(e.to_string()))
  }

  fn delete(&mut self, key: &str) {
    self.session.remove(key);
  }

  fn mark_dirty(&mut self) {}
}
