// shop_api/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::{CategoryChanges, NewCategory};
use crate::state::AppState;
use crate::web::extractors::StaffUser;
use crate::web::validation::{Form, NAME_MAX_LEN};

fn category_not_found(slug: &str) -> AppError {
  warn!(slug, "Category not found.");
  AppError::NotFound(format!("Category '{}' not found.", slug))
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.store.list_categories().await?;
  info!("Fetched {} categories.", categories.len());
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(slug = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let slug = path.into_inner();
  match app_state.store.category_by_slug(&slug).await? {
    Some(category) => Ok(HttpResponse::Ok().json(category)),
    None => Err(category_not_found(&slug)),
  }
}

#[instrument(name = "handler::create_category", skip(app_state, staff, body), fields(staff = %staff.email))]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let mut form = Form::new(&body, false)?;
  let name = form.string("name", NAME_MAX_LEN);
  let slug = form.slug("slug");
  let new_category = form.finish(name.zip(slug).map(|(name, slug)| NewCategory { name, slug }))?;

  let category = app_state.store.create_category(new_category).await?;
  info!(category_id = category.id, "Category created.");
  Ok(HttpResponse::Created().json(category))
}

async fn update_category(
  app_state: &AppState,
  slug: &str,
  body: &Value,
  partial: bool,
) -> Result<HttpResponse, AppError> {
  let mut form = Form::new(body, partial)?;
  let changes = CategoryChanges {
    name: form.string("name", NAME_MAX_LEN),
    slug: form.slug("slug"),
  };
  let changes = form.finish(Some(changes))?;

  match app_state.store.update_category(slug, changes).await? {
    Some(category) => {
      info!(category_id = category.id, "Category updated.");
      Ok(HttpResponse::Ok().json(category))
    }
    None => Err(category_not_found(slug)),
  }
}

#[instrument(name = "handler::update_category", skip(app_state, staff, path, body), fields(staff = %staff.email, slug = %path.as_ref()))]
pub async fn update_category_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  path: web::Path<String>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  update_category(&app_state, &path, &body, false).await
}

#[instrument(name = "handler::patch_category", skip(app_state, staff, path, body), fields(staff = %staff.email, slug = %path.as_ref()))]
pub async fn patch_category_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  path: web::Path<String>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  update_category(&app_state, &path, &body, true).await
}

#[instrument(name = "handler::delete_category", skip(app_state, staff, path), fields(staff = %staff.email, slug = %path.as_ref()))]
pub async fn delete_category_handler(
  app_state: web::Data<AppState>,
  staff: StaffUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  if !app_state.store.delete_category(&path).await? {
    return Err(category_not_found(&path));
  }
  info!("Category deleted.");
  Ok(HttpResponse::NoContent().finish())
}
