// shop_api/src/models/auth_token.rs

use sqlx::FromRow;

/// Static API token. Staff tokens may write to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AuthToken {
  pub key: String,
  pub user_email: String,
  pub is_staff: bool,
}
