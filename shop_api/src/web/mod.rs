// shop_api/src/web/mod.rs

// Declare child modules
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod validation;

pub use routes::configure_app_routes;

use crate::errors::AppError;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::web;

pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Cookie-backed client sessions; the cart lives inside them.
///
/// Browsers cap a cookie at about 4 KB and `CookieSessionStore` refuses to
/// write a larger session. Each cart line costs roughly 40 bytes before
/// encryption, so a cart of a few dozen lines fits. Past the cap the session
/// save fails while the response is written and the client gets a 500 from
/// the middleware instead of a cart error.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
  SessionMiddleware::builder(CookieSessionStore::default(), key)
    .cookie_name(SESSION_COOKIE_NAME.to_string())
    .cookie_secure(secure)
    .build()
}

/// Malformed JSON bodies become a 400 in the usual error shape.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Path segments that fail to parse (e.g. a non-numeric product id) match no resource.
pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|_err, req| AppError::NotFound(format!("No resource at {}.", req.path())).into())
}
