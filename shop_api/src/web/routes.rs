// shop_api/src/web/routes.rs

use crate::web::handlers::{cart_handlers, category_handlers, product_handlers};
use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the handler tests) to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      // Catalog: reads are public, writes need a staff token.
      .service(
        web::resource("/categories")
          .route(web::get().to(category_handlers::list_categories_handler))
          .route(web::post().to(category_handlers::create_category_handler)),
      )
      .service(
        web::resource("/categories/{slug}")
          .route(web::get().to(category_handlers::get_category_handler))
          .route(web::put().to(category_handlers::update_category_handler))
          .route(web::patch().to(category_handlers::patch_category_handler))
          .route(web::delete().to(category_handlers::delete_category_handler)),
      )
      .service(
        web::resource("/products")
          .route(web::get().to(product_handlers::list_products_handler))
          .route(web::post().to(product_handlers::create_product_handler)),
      )
      .service(
        web::resource("/products/{slug}")
          .route(web::get().to(product_handlers::get_product_handler))
          .route(web::put().to(product_handlers::update_product_handler))
          .route(web::patch().to(product_handlers::patch_product_handler))
          .route(web::delete().to(product_handlers::delete_product_handler)),
      )
      // Cart: anonymous, keyed by the session cookie.
      .service(
        web::resource("/cart")
          .route(web::get().to(cart_handlers::cart_detail_handler))
          .route(web::post().to(cart_handlers::cart_add_handler))
          .route(web::put().to(cart_handlers::cart_update_handler))
          .route(web::delete().to(cart_handlers::cart_clear_handler)),
      )
      .service(web::resource("/cart/{product_id}").route(web::delete().to(cart_handlers::cart_remove_handler))),
  );
}
