// shop_api/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod auth_token;
pub mod category;
pub mod product;

// Re-export the model structs for convenient access
pub use auth_token::AuthToken;
pub use category::{Category, CategoryChanges, NewCategory};
pub use product::{NewProduct, Product, ProductChanges, ProductSummary};
