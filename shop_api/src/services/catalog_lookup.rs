// shop_api/src/services/catalog_lookup.rs

use crate::db::ShopStore;
use crate::models::ProductSummary;
use async_trait::async_trait;
use cartshop::{LookupError, ProductId, ProductLookup};
use std::sync::Arc;

/// Resolves cart lines against the catalog store.
#[derive(Clone)]
pub struct CatalogLookup {
  store: Arc<dyn ShopStore>,
}

impl CatalogLookup {
  pub fn new(store: Arc<dyn ShopStore>) -> Self {
    Self { store }
  }
}

#[async_trait]
impl ProductLookup for CatalogLookup {
  type Product = ProductSummary;

  async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<ProductSummary>, LookupError> {
    let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
    self
      .store
      .products_by_ids(&raw)
      .await
      .map_err(|e| LookupError::with_source("Catalog query failed", e))
  }
}
