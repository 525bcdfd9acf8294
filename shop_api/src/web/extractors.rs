// shop_api/src/web/extractors.rs

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

pub const PERMISSION_DENIED: &str = "You are not allowed to do this.";

/// A request authenticated with a staff API token (`Authorization: Token <key>`).
///
/// Handlers for catalog writes take this as an argument; read handlers don't,
/// which gives the "admin or read-only" rule. A missing or unknown token
/// rejects with 401, a known non-staff token with 403.
#[derive(Debug, Clone)]
pub struct StaffUser {
  pub email: String,
}

fn token_from_header(req: &HttpRequest) -> Result<String, AppError> {
  let Some(value) = req.headers().get(header::AUTHORIZATION) else {
    return Err(AppError::Auth("Authentication credentials were not provided.".to_string()));
  };
  let value = value
    .to_str()
    .map_err(|_| AppError::Auth("Invalid token header.".to_string()))?;

  let mut parts = value.split_whitespace();
  match (parts.next(), parts.next(), parts.next()) {
    (Some(scheme), Some(key), None) if scheme.eq_ignore_ascii_case("token") => Ok(key.to_string()),
    (Some(scheme), None, _) if scheme.eq_ignore_ascii_case("token") => Err(AppError::Auth(
      "Invalid token header. No credentials provided.".to_string(),
    )),
    (Some(scheme), Some(_), Some(_)) if scheme.eq_ignore_ascii_case("token") => Err(AppError::Auth(
      "Invalid token header. Token string should not contain spaces.".to_string(),
    )),
    _ => Err(AppError::Auth("Authentication credentials were not provided.".to_string())),
  }
}

impl FromRequest for StaffUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = req.app_data::<web::Data<AppState>>().cloned();
    let key = token_from_header(req);

    Box::pin(async move {
      let state = state.ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;
      let key = key?;

      let Some(token) = state.store.find_token(&key).await? else {
        warn!("Rejected unknown API token.");
        return Err(AppError::Auth("Invalid token.".to_string()));
      };
      if !token.is_staff {
        warn!(user = %token.user_email, "Non-staff token attempted a catalog write.");
        return Err(AppError::Forbidden(PERMISSION_DENIED.to_string()));
      }

      debug!(user = %token.user_email, "Staff token accepted.");
      Ok(StaffUser { email: token.user_email })
    })
  }
}
