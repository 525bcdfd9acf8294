// src/lib.rs

//! Cartshop: a session-backed shopping cart.
//!
//! The cart keeps a mapping of product id to quantity and unit price inside a
//! client session and offers:
//!  - Merge or replace-quantity adds, with the unit price captured on first add.
//!  - Removal of whole lines and clearing of the entire cart.
//!  - Exact decimal totals (never floating point).
//!  - Enrichment of lines with catalog products through one batch lookup.
//!
//! The session and the catalog are collaborators supplied by the host, see
//! [`SessionStore`] and [`ProductLookup`].

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod session;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, CartDetails, CartEntry, CartLine, CartState, ProductId};
pub use crate::catalog::{Priced, ProductLookup};
pub use crate::error::{CartError, CartResult, LookupError, SessionError};
pub use crate::session::{MemorySession, SessionStore, DEFAULT_CART_SESSION_KEY};

// Decimal type used for every amount in the public API.
pub use rust_decimal::Decimal;
