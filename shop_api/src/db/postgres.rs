// shop_api/src/db/postgres.rs

use super::ShopStore;
use crate::errors::{AppError, Result};
use crate::models::{
  AuthToken, Category, CategoryChanges, NewCategory, NewProduct, Product, ProductChanges, ProductSummary,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

const PRODUCT_COLUMNS: &str = "SELECT p.id, p.name, p.slug, p.description, p.image, p.price, p.available, \
   p.created, p.updated, c.id AS category_id, c.name AS category_name, c.slug AS category_slug \
   FROM products p JOIN categories c ON c.id = p.category_id";

const CATEGORY_SLUG_TAKEN: &str = "category with this slug already exists.";
const PRODUCT_SLUG_TAKEN: &str = "product with this slug already exists.";

#[derive(Debug, Clone)]
pub struct PgShopStore {
  pool: PgPool,
}

impl PgShopStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Finds the category matching both `name` and `slug`, creating it if absent.
async fn get_or_create_category_tx(tx: &mut Transaction<'_, Postgres>, category: &NewCategory) -> Result<Category> {
  let existing: Option<Category> = sqlx::query_as("SELECT id, name, slug FROM categories WHERE name = $1 AND slug = $2")
    .bind(&category.name)
    .bind(&category.slug)
    .fetch_optional(&mut **tx)
    .await?;
  if let Some(found) = existing {
    return Ok(found);
  }

  debug!(slug = %category.slug, "Creating category for product.");
  sqlx::query_as("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id, name, slug")
    .bind(&category.name)
    .bind(&category.slug)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| AppError::unique_violation(e, "category", CATEGORY_SLUG_TAKEN))
}

#[async_trait]
impl ShopStore for PgShopStore {
  async fn list_categories(&self) -> Result<Vec<Category>> {
    Ok(
      sqlx::query_as("SELECT id, name, slug FROM categories ORDER BY id")
        .fetch_all(&self.pool)
        .await?,
    )
  }

  async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
    Ok(
      sqlx::query_as("SELECT id, name, slug FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?,
    )
  }

  #[instrument(name = "db::create_category", skip(self, category), fields(slug = %category.slug))]
  async fn create_category(&self, category: NewCategory) -> Result<Category> {
    sqlx::query_as("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id, name, slug")
      .bind(&category.name)
      .bind(&category.slug)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| AppError::unique_violation(e, "slug", CATEGORY_SLUG_TAKEN))
  }

  async fn update_category(&self, slug: &str, changes: CategoryChanges) -> Result<Option<Category>> {
    sqlx::query_as(
      "UPDATE categories SET name = COALESCE($2, name), slug = COALESCE($3, slug) \
       WHERE slug = $1 RETURNING id, name, slug",
    )
    .bind(slug)
    .bind(changes.name)
    .bind(changes.slug)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| AppError::unique_violation(e, "slug", CATEGORY_SLUG_TAKEN))
  }

  async fn delete_category(&self, slug: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE slug = $1")
      .bind(slug)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn list_products(&self) -> Result<Vec<ProductSummary>> {
    let sql = format!("{} ORDER BY p.id", PRODUCT_COLUMNS);
    let products: Vec<Product> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
    Ok(products.into_iter().map(ProductSummary::from).collect())
  }

  async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>> {
    let sql = format!("{} WHERE p.slug = $1", PRODUCT_COLUMNS);
    Ok(sqlx::query_as(&sql).bind(slug).fetch_optional(&self.pool).await?)
  }

  async fn product_by_id(&self, id: i64) -> Result<Option<Product>> {
    let sql = format!("{} WHERE p.id = $1", PRODUCT_COLUMNS);
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?)
  }

  #[instrument(name = "db::products_by_ids", skip(self, ids), fields(count = ids.len()))]
  async fn products_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductSummary>> {
    let sql = format!("{} WHERE p.id = ANY($1)", PRODUCT_COLUMNS);
    let products: Vec<Product> = sqlx::query_as(&sql).bind(ids).fetch_all(&self.pool).await?;
    Ok(products.into_iter().map(ProductSummary::from).collect())
  }

  #[instrument(name = "db::create_product", skip(self, product), fields(slug = %product.slug))]
  async fn create_product(&self, product: NewProduct) -> Result<Product> {
    let mut tx = self.pool.begin().await?;
    let category = get_or_create_category_tx(&mut tx, &product.category).await?;

    let id: i64 = sqlx::query_scalar(
      "INSERT INTO products (category_id, name, slug, description, price, available) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(category.id)
    .bind(&product.name)
    .bind(&product.slug)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.available)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::unique_violation(e, "slug", PRODUCT_SLUG_TAKEN))?;

    tx.commit().await?;
    self
      .product_by_id(id)
      .await?
      .ok_or_else(|| AppError::Internal(format!("Product {} vanished after insert.", id)))
  }

  #[instrument(name = "db::update_product", skip(self, changes))]
  async fn update_product(&self, slug: &str, changes: ProductChanges) -> Result<Option<Product>> {
    let mut tx = self.pool.begin().await?;
    let category_id = match &changes.category {
      Some(category) => Some(get_or_create_category_tx(&mut tx, category).await?.id),
      None => None,
    };

    let id: Option<i64> = sqlx::query_scalar(
      "UPDATE products SET category_id = COALESCE($2, category_id), name = COALESCE($3, name), \
       slug = COALESCE($4, slug), description = COALESCE($5, description), price = COALESCE($6, price), \
       available = COALESCE($7, available), updated = NOW() \
       WHERE slug = $1 RETURNING id",
    )
    .bind(slug)
    .bind(category_id)
    .bind(changes.name)
    .bind(changes.slug)
    .bind(changes.description)
    .bind(changes.price)
    .bind(changes.available)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| AppError::unique_violation(e, "slug", PRODUCT_SLUG_TAKEN))?;

    let Some(id) = id else {
      // Nothing matched; drop any category created above.
      tx.rollback().await?;
      return Ok(None);
    };
    tx.commit().await?;
    self.product_by_id(id).await
  }

  async fn delete_product(&self, slug: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE slug = $1")
      .bind(slug)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn find_token(&self, key: &str) -> Result<Option<AuthToken>> {
    Ok(
      sqlx::query_as("SELECT key, user_email, is_staff FROM auth_tokens WHERE key = $1")
        .bind(key)
        .fetch_optional(&self.pool)
        .await?,
    )
  }
}
