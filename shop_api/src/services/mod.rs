// shop_api/src/services/mod.rs

//! Adapters between the web layer and the cart aggregate.

pub mod cart_session;
pub mod catalog_lookup;

pub use cart_session::CartSession;
pub use catalog_lookup::CatalogLookup;
