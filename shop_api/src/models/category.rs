// shop_api/src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
  pub id: i64,
  pub name: String,
  pub slug: String,
}

/// Validated input for creating (or get-or-creating) a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
  pub name: String,
  pub slug: String,
}

/// Validated partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
  pub name: Option<String>,
  pub slug: Option<String>,
}
