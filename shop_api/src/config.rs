// shop_api/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use actix_web::cookie::Key;
use cartshop::DEFAULT_CART_SESSION_KEY;
use dotenvy::dotenv;
use std::env;

/// Signing keys shorter than this are rejected by the cookie layer.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  /// Session slot holding the cart mapping.
  pub cart_session_id: String,
  pub session_secret: Option<String>,
  pub session_cookie_secure: bool,

  pub run_migrations: bool,
  pub log_json: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let parse_bool = |var_name: &str, default: bool| -> Result<bool> {
      match get_env(var_name) {
        Ok(raw) => raw
          .trim()
          .parse::<bool>()
          .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e))),
        Err(_) => Ok(default),
      }
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;

    let cart_session_id = get_env("CART_SESSION_ID").unwrap_or_else(|_| DEFAULT_CART_SESSION_KEY.to_string());
    let session_secret = get_env("SESSION_SECRET").ok();
    if let Some(secret) = &session_secret {
      if secret.len() < MIN_SESSION_SECRET_LEN {
        return Err(AppError::Config(format!(
          "SESSION_SECRET must be at least {} bytes long",
          MIN_SESSION_SECRET_LEN
        )));
      }
    }
    let session_cookie_secure = parse_bool("SESSION_COOKIE_SECURE", false)?;

    let run_migrations = parse_bool("RUN_MIGRATIONS", false)?;
    let log_json = get_env("LOG_FORMAT").map(|f| f.eq_ignore_ascii_case("json")).unwrap_or(false);

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      cart_session_id,
      session_secret,
      session_cookie_secure,
      run_migrations,
      log_json,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  /// Cookie signing key. Without `SESSION_SECRET` a random key is generated,
  /// so carts do not survive a restart.
  pub fn session_key(&self) -> Result<Key> {
    match &self.session_secret {
      Some(secret) => {
        Key::try_from(secret.as_bytes()).map_err(|e| AppError::Config(format!("Invalid SESSION_SECRET: {}", e)))
      }
      None => {
        tracing::warn!("SESSION_SECRET not set; using an ephemeral session key.");
        Ok(Key::generate())
      }
    }
  }
}
