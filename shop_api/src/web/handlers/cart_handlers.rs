// shop_api/src/web/handlers/cart_handlers.rs

use actix_session::Session;
use actix_web::{web, HttpResponse};
use cartshop::Cart;
use serde::Serialize;
use serde_json::Value;
use std::num::NonZeroU32;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::Product;
use crate::services::CartSession;
use crate::state::AppState;
use crate::web::validation::Form;

/// Quantities a single add or update may carry.
pub const QUANTITY_CHOICES: std::ops::RangeInclusive<u32> = 1..=20;

/// Validated add/update body; echoed back on success.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AddToCartPayload {
  pub quantity: NonZeroU32,
  pub product_id: i64,
}

impl AddToCartPayload {
  fn parse(body: &Value) -> Result<Self, AppError> {
    let mut form = Form::new(body, false)?;
    let quantity = form.choice("quantity", QUANTITY_CHOICES).and_then(NonZeroU32::new);
    let product_id = form.integer("product_id");
    form.finish(quantity.zip(product_id).map(|(quantity, product_id)| Self { quantity, product_id }))
  }
}

fn cart_for<'s>(app_state: &AppState, session: &'s Session) -> Cart<CartSession<'s>> {
  Cart::with_key(CartSession::new(session), app_state.config.cart_session_id.as_str())
}

async fn product_or_404(app_state: &AppState, product_id: i64) -> Result<Product, AppError> {
  app_state.store.product_by_id(product_id).await?.ok_or_else(|| {
    warn!(product_id, "Cart request for unknown product.");
    AppError::NotFound(format!("Product with ID {} not found.", product_id))
  })
}

#[instrument(name = "handler::cart_detail", skip(app_state, session))]
pub async fn cart_detail_handler(app_state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
  let cart = cart_for(&app_state, &session);
  let details = cart.details(&app_state.catalog_lookup()).await?;
  info!(
    lines = details.products.len(),
    total_price = %details.total_price,
    "Cart details rendered."
  );
  Ok(HttpResponse::Ok().json(details))
}

async fn add_to_cart(
  app_state: &AppState,
  session: &Session,
  body: &Value,
  replace_quantity: bool,
) -> Result<AddToCartPayload, AppError> {
  let payload = AddToCartPayload::parse(body)?;
  let product = product_or_404(app_state, payload.product_id).await?;

  let mut cart = cart_for(app_state, session);
  cart.add(&product, payload.quantity, replace_quantity)?;
  info!(
    product_id = payload.product_id,
    quantity = payload.quantity.get(),
    replace_quantity,
    cart_total = %cart.total_price(),
    "Cart updated."
  );
  Ok(payload)
}

/// POST: adds to the current quantity.
#[instrument(name = "handler::cart_add", skip(app_state, session, body))]
pub async fn cart_add_handler(
  app_state: web::Data<AppState>,
  session: Session,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let payload = add_to_cart(&app_state, &session, &body, false).await?;
  Ok(HttpResponse::Created().json(payload))
}

/// PUT: overwrites the current quantity.
#[instrument(name = "handler::cart_update", skip(app_state, session, body))]
pub async fn cart_update_handler(
  app_state: web::Data<AppState>,
  session: Session,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let payload = add_to_cart(&app_state, &session, &body, true).await?;
  Ok(HttpResponse::Ok().json(payload))
}

#[instrument(name = "handler::cart_remove", skip(app_state, session, path), fields(product_id = %path.as_ref()))]
pub async fn cart_remove_handler(
  app_state: web::Data<AppState>,
  session: Session,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = product_or_404(&app_state, path.into_inner()).await?;
  let removed = cart_for(&app_state, &session).remove(&product)?;
  info!(removed, "Cart line removal handled.");
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::cart_clear", skip(app_state, session))]
pub async fn cart_clear_handler(app_state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
  cart_for(&app_state, &session).clear();
  info!("Cart cleared.");
  Ok(HttpResponse::NoContent().finish())
}
