// shop_api/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::ProductChanges;
use crate::state::AppState;
use crate::web::extractors::StaffUser;
use crate::web::validation::{Form, NAME_MAX_LEN};

fn product_not_found(slug: &str) -> AppError {
  warn!(slug, "Product not found.");
  AppError::NotFound(format!("Product '{}' not found.", slug))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.store.list_products().await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(slug = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let slug = path.into_inner();
  match app_state.store.product_by_slug(&slug).await? {
    Some(product) => Ok(HttpResponse::Ok().json(product)),
    None => Err(product_not_found(&slug)),
  }
}

/// Reads product fields. The nested category is get-or-created by the store.
fn parse_changes(body: &Value, partial: bool) -> Result<ProductChanges, AppError> {
  let mut form = Form::new(body, partial)?;
  let changes = ProductChanges {
    category: form.category("category"),
    name: form.string("name", NAME_MAX_LEN),
    slug: form.slug("slug"),
    description: form.text("description"),
    price: form.price("price"),
    available: form.boolean("available"),
  };
  form.finish(Some(changes))
}

#[instrument(name = "handler::create_product", skip(app_state, staff, body), fields(staff = %staff.email))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let changes = parse_changes(&body, false)?;
  let new_product = changes
    .into_new_product()
    .ok_or_else(|| AppError::Validation("Invalid input.".to_string()))?;

  let product = app_state.store.create_product(new_product).await?;
  info!(product_id = product.id, category = %product.category.slug, "Product created.");
  Ok(HttpResponse::Created().json(product))
}

async fn update_product(
  app_state: &AppState,
  slug: &str,
  body: &Value,
  partial: bool,
) -> Result<HttpResponse, AppError> {
  let changes = parse_changes(body, partial)?;
  match app_state.store.update_product(slug, changes).await? {
    Some(product) => {
      info!(product_id = product.id, "Product updated.");
      Ok(HttpResponse::Ok().json(product))
    }
    None => Err(product_not_found(slug)),
  }
}

#[instrument(name = "handler::update_product", skip(app_state, staff, path, body), fields(staff = %staff.email, slug = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  path: web::Path<String>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  update_product(&app_state, &path, &body, false).await
}

#[instrument(name = "handler::patch_product", skip(app_state, staff, path, body), fields(staff = %staff.email, slug = %path.as_ref()))]
pub async fn patch_product_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  path: web::Path<String>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  update_product(&app_state, &path, &body, true).await
}

#[instrument(name = "handler::delete_product", skip(app_state, staff, path), fields(staff = %staff.email, slug = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  if !app_state.store.delete_product(&path).await? {
    return Err(product_not_found(&path));
  }
  info!("Product deleted.");
  Ok(HttpResponse::NoContent().finish())
}
