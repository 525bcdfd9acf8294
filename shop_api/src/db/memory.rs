// shop_api/src/db/memory.rs

//! In-memory [`ShopStore`] for handler tests.

use super::ShopStore;
use crate::errors::{AppError, FieldErrors, Result};
use crate::models::{
  AuthToken, Category, CategoryChanges, NewCategory, NewProduct, Product, ProductChanges, ProductSummary,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
  categories: Vec<Category>,
  products: Vec<Product>,
  tokens: Vec<AuthToken>,
  next_id: i64,
}

impl Tables {
  fn next_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }

  fn get_or_create_category(&mut self, category: &NewCategory) -> Result<Category> {
    if let Some(found) = self
      .categories
      .iter()
      .find(|c| c.name == category.name && c.slug == category.slug)
    {
      return Ok(found.clone());
    }
    if self.categories.iter().any(|c| c.slug == category.slug) {
      return Err(AppError::InvalidFields(FieldErrors::single(
        "category",
        "category with this slug already exists.",
      )));
    }
    let created = Category {
      id: self.next_id(),
      name: category.name.clone(),
      slug: category.slug.clone(),
    };
    self.categories.push(created.clone());
    Ok(created)
  }
}

#[derive(Default)]
pub struct MemoryShopStore {
  tables: RwLock<Tables>,
}

impl MemoryShopStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn add_token(&self, key: &str, is_staff: bool) {
    self.tables.write().await.tokens.push(AuthToken {
      key: key.to_string(),
      user_email: format!("{}@example.com", key),
      is_staff,
    });
  }

  /// Seeds a product under category `shirts`; returns it.
  pub async fn seed_product(&self, slug: &str, price: Decimal) -> Product {
    self
      .create_product(NewProduct {
        category: NewCategory {
          name: "shirts".to_string(),
          slug: "shirts".to_string(),
        },
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: String::new(),
        price,
        available: true,
      })
      .await
      .unwrap()
  }
}

#[async_trait]
impl ShopStore for MemoryShopStore {
  async fn list_categories(&self) -> Result<Vec<Category>> {
    Ok(self.tables.read().await.categories.clone())
  }

  async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
    Ok(self.tables.read().await.categories.iter().find(|c| c.slug == slug).cloned())
  }

  async fn create_category(&self, category: NewCategory) -> Result<Category> {
    let mut tables = self.tables.write().await;
    if tables.categories.iter().any(|c| c.slug == category.slug) {
      return Err(AppError::InvalidFields(FieldErrors::single(
        "slug",
        "category with this slug already exists.",
      )));
    }
    tables.get_or_create_category(&category)
  }

  async fn update_category(&self, slug: &str, changes: CategoryChanges) -> Result<Option<Category>> {
    let mut tables = self.tables.write().await;
    if let Some(new_slug) = &changes.slug {
      if new_slug != slug && tables.categories.iter().any(|c| &c.slug == new_slug) {
        return Err(AppError::InvalidFields(FieldErrors::single(
          "slug",
          "category with this slug already exists.",
        )));
      }
    }
    let Some(category) = tables.categories.iter_mut().find(|c| c.slug == slug) else {
      return Ok(None);
    };
    if let Some(name) = changes.name {
      category.name = name;
    }
    if let Some(new_slug) = changes.slug {
      category.slug = new_slug;
    }
    let updated = category.clone();
    for product in tables.products.iter_mut().filter(|p| p.category.id == updated.id) {
      product.category = updated.clone();
    }
    Ok(Some(updated))
  }

  async fn delete_category(&self, slug: &str) -> Result<bool> {
    let mut tables = self.tables.write().await;
    let Some(index) = tables.categories.iter().position(|c| c.slug == slug) else {
      return Ok(false);
    };
    let removed = tables.categories.remove(index);
    tables.products.retain(|p| p.category.id != removed.id);
    Ok(true)
  }

  async fn list_products(&self) -> Result<Vec<ProductSummary>> {
    Ok(self.tables.read().await.products.iter().map(ProductSummary::from).collect())
  }

  async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>> {
    Ok(self.tables.read().await.products.iter().find(|p| p.slug == slug).cloned())
  }

  async fn product_by_id(&self, id: i64) -> Result<Option<Product>> {
    Ok(self.tables.read().await.products.iter().find(|p| p.id == id).cloned())
  }

  async fn products_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductSummary>> {
    Ok(
      self
        .tables
        .read()
        .await
        .products
        .iter()
        .filter(|p| ids.contains(&p.id))
        .map(ProductSummary::from)
        .collect(),
    )
  }

  async fn create_product(&self, product: NewProduct) -> Result<Product> {
    let mut tables = self.tables.write().await;
    if tables.products.iter().any(|p| p.slug == product.slug) {
      return Err(AppError::InvalidFields(FieldErrors::single(
        "slug",
        "product with this slug already exists.",
      )));
    }
    let category = tables.get_or_create_category(&product.category)?;
    let now = Utc::now();
    let created = Product {
      id: tables.next_id(),
      name: product.name,
      category,
      slug: product.slug,
      price: product.price,
      available: product.available,
      description: product.description,
      image: None,
      created: now,
      updated: now,
    };
    tables.products.push(created.clone());
    Ok(created)
  }

  async fn update_product(&self, slug: &str, changes: ProductChanges) -> Result<Option<Product>> {
    let mut tables = self.tables.write().await;
    if !tables.products.iter().any(|p| p.slug == slug) {
      return Ok(None);
    }
    if let Some(new_slug) = &changes.slug {
      if new_slug != slug && tables.products.iter().any(|p| &p.slug == new_slug) {
        return Err(AppError::InvalidFields(FieldErrors::single(
          "slug",
          "product with this slug already exists.",
        )));
      }
    }
    let category = match &changes.category {
      Some(category) => Some(tables.get_or_create_category(category)?),
      None => None,
    };

    let Some(product) = tables.products.iter_mut().find(|p| p.slug == slug) else {
      return Ok(None);
    };
    if let Some(category) = category {
      product.category = category;
    }
    if let Some(name) = changes.name {
      product.name = name;
    }
    if let Some(new_slug) = changes.slug {
      product.slug = new_slug;
    }
    if let Some(description) = changes.description {
      product.description = description;
    }
    if let Some(price) = changes.price {
      product.price = price;
    }
    if let Some(available) = changes.available {
      product.available = available;
    }
    product.updated = Utc::now();
    Ok(Some(product.clone()))
  }

  async fn delete_product(&self, slug: &str) -> Result<bool> {
    let mut tables = self.tables.write().await;
    let before = tables.products.len();
    tables.products.retain(|p| p.slug != slug);
    Ok(tables.products.len() != before)
  }

  async fn find_token(&self, key: &str) -> Result<Option<AuthToken>> {
    Ok(self.tables.read().await.tokens.iter().find(|t| t.key == key).cloned())
  }
}
