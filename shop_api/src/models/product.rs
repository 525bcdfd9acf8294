// shop_api/src/models/product.rs

use super::category::{Category, NewCategory};
use cartshop::{Priced, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};

/// A catalog product with its category, as shown by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub category: Category,
  pub slug: String,
  pub price: Decimal,
  pub available: bool,
  pub description: String,
  pub image: Option<String>,
  pub created: DateTime<Utc>,
  pub updated: DateTime<Utc>,
}

/// The list-view projection of a product, also embedded in cart lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
  pub id: i64,
  pub name: String,
  pub category: Category,
  pub slug: String,
  pub price: Decimal,
  pub available: bool,
}

impl From<Product> for ProductSummary {
  fn from(product: Product) -> Self {
    Self {
      id: product.id,
      name: product.name,
      category: product.category,
      slug: product.slug,
      price: product.price,
      available: product.available,
    }
  }
}

impl From<&Product> for ProductSummary {
  fn from(product: &Product) -> Self {
    ProductSummary::from(product.clone())
  }
}

impl Priced for Product {
  fn id(&self) -> ProductId {
    ProductId(self.id)
  }

  fn price(&self) -> Decimal {
    self.price
  }
}

impl Priced for ProductSummary {
  fn id(&self) -> ProductId {
    ProductId(self.id)
  }

  fn price(&self) -> Decimal {
    self.price
  }
}

// Rows come from `products` joined with `categories`, category columns prefixed.
impl<'r> FromRow<'r, PgRow> for Product {
  fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
    Ok(Self {
      id: row.try_get("id")?,
      name: row.try_get("name")?,
      category: Category {
        id: row.try_get("category_id")?,
        name: row.try_get("category_name")?,
        slug: row.try_get("category_slug")?,
      },
      slug: row.try_get("slug")?,
      price: row.try_get("price")?,
      available: row.try_get("available")?,
      description: row.try_get("description")?,
      image: row.try_get("image")?,
      created: row.try_get("created")?,
      updated: row.try_get("updated")?,
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub category: NewCategory,
  pub name: String,
  pub slug: String,
  pub description: String,
  pub price: Decimal,
  pub available: bool,
}

/// Validated partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
  pub category: Option<NewCategory>,
  pub name: Option<String>,
  pub slug: Option<String>,
  pub description: Option<String>,
  pub price: Option<Decimal>,
  pub available: Option<bool>,
}

impl ProductChanges {
  /// A full product, if every required field is set. Missing `description`
  /// defaults to empty and missing `available` to true.
  pub fn into_new_product(self) -> Option<NewProduct> {
    Some(NewProduct {
      category: self.category?,
      name: self.name?,
      slug: self.slug?,
      description: self.description.unwrap_or_default(),
      price: self.price?,
      available: self.available.unwrap_or(true),
    })
  }
}
