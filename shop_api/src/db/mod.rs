// shop_api/src/db/mod.rs

//! Catalog persistence. Handlers only see the [`ShopStore`] trait; the
//! server wires in [`PgShopStore`].

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgShopStore;

use crate::errors::Result;
use crate::models::{
  AuthToken, Category, CategoryChanges, NewCategory, NewProduct, Product, ProductChanges, ProductSummary,
};
use async_trait::async_trait;

#[async_trait]
pub trait ShopStore: Send + Sync {
  async fn list_categories(&self) -> Result<Vec<Category>>;
  async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
  async fn create_category(&self, category: NewCategory) -> Result<Category>;
  /// Returns `None` when no category has `slug`.
  async fn update_category(&self, slug: &str, changes: CategoryChanges) -> Result<Option<Category>>;
  /// Deletes the category and, by cascade, its products. Returns whether a row was deleted.
  async fn delete_category(&self, slug: &str) -> Result<bool>;

  async fn list_products(&self) -> Result<Vec<ProductSummary>>;
  async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>>;
  async fn product_by_id(&self, id: i64) -> Result<Option<Product>>;
  /// Batch lookup; ids with no product are simply absent from the result.
  async fn products_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductSummary>>;
  async fn create_product(&self, product: NewProduct) -> Result<Product>;
  async fn update_product(&self, slug: &str, changes: ProductChanges) -> Result<Option<Product>>;
  async fn delete_product(&self, slug: &str) -> Result<bool>;

  async fn find_token(&self, key: &str) -> Result<Option<AuthToken>>;
}
