// shop_api/src/state.rs
use crate::config::AppConfig;
use crate::db::ShopStore;
use crate::services::CatalogLookup;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ShopStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn ShopStore>, config: Arc<AppConfig>) -> Self {
    Self { store, config }
  }

  pub fn catalog_lookup(&self) -> CatalogLookup {
    CatalogLookup::new(self.store.clone())
  }
}
