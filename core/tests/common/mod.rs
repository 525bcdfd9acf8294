// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper.

use cartshop::{Decimal, LookupError, Priced, ProductId, ProductLookup};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Level;

// --- Catalog fixtures ---
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TestProduct {
  pub id: i64,
  pub name: String,
  pub price: Decimal,
}

impl Priced for TestProduct {
  fn id(&self) -> ProductId {
    ProductId(self.id)
  }

  fn price(&self) -> Decimal {
    self.price
  }
}

pub fn dec(s: &str) -> Decimal {
  Decimal::from_str(s).unwrap()
}

pub fn qty(n: u32) -> NonZeroU32 {
  NonZeroU32::new(n).unwrap()
}

pub fn product(id: i64, name: &str, price: &str) -> TestProduct {
  TestProduct {
    id,
    name: name.to_string(),
    price: dec(price),
  }
}

/// Catalog double that records every batch lookup it serves.
#[derive(Debug, Default)]
pub struct TestCatalog {
  products: Mutex<HashMap<i64, TestProduct>>,
  pub lookups: AtomicUsize,
  pub requested: Mutex<Vec<Vec<ProductId>>>,
  pub fail_with: Option<String>,
}

impl TestCatalog {
  pub fn with_products(products: &[TestProduct]) -> Self {
    let catalog = Self::default();
    for p in products {
      catalog.upsert(p.clone());
    }
    catalog
  }

  pub fn failing(message: &str) -> Self {
    Self {
      fail_with: Some(message.to_string()),
      ..Default::default()
    }
  }

  pub fn upsert(&self, product: TestProduct) {
    self.products.lock().insert(product.id, product);
  }

  pub fn delete(&self, id: i64) {
    self.products.lock().remove(&id);
  }

  pub fn lookup_count(&self) -> usize {
    self.lookups.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ProductLookup for TestCatalog {
  type Product = TestProduct;

  async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<TestProduct>, LookupError> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    self.requested.lock().push(ids.to_vec());
    if let Some(message) = &self.fail_with {
      return Err(LookupError {
        message: message.clone(),
        source: Some(anyhow::anyhow!("simulated catalog outage").into()),
      });
    }
    let products = self.products.lock();
    // Deliberately ignore request order, like an unordered `WHERE id IN (...)`.
    let mut found: Vec<TestProduct> = ids.iter().filter_map(|id| products.get(&id.get()).cloned()).collect();
    found.sort_by_key(|p| p.id);
    Ok(found)
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
