// shop_api/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cartshop::CartError;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Per-field validation messages, rendered as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_string()).or_default().push(message.into());
  }

  pub fn single(field: &str, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.add(field, message);
    errors
  }

  pub fn extend(&mut self, other: FieldErrors) {
    for (field, messages) in other.0 {
      self.0.entry(field).or_default().extend(messages);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  /// `Ok(value)` when no error was recorded.
  pub fn into_result<T>(self, value: T) -> Result<T> {
    if self.is_empty() {
      Ok(value)
    } else {
      Err(AppError::InvalidFields(self))
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> = self
      .0
      .iter()
      .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
      .collect();
    write!(f, "{}", parts.join("; "))
  }
}

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Invalid Fields: {0}")]
  InvalidFields(FieldErrors),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Permission Denied: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Maps a unique-constraint violation to a field error, passing other
  /// database errors through.
  pub fn unique_violation(err: sqlx::Error, field: &str, message: &str) -> Self {
    match &err {
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
        AppError::InvalidFields(FieldErrors::single(field, message))
      }
      _ => AppError::Sqlx(err),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::InvalidFields(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Cart(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }

    let mut builder = HttpResponse::build(status);
    match self {
      AppError::Validation(m) | AppError::Forbidden(m) | AppError::NotFound(m) => builder.json(json!({"error": m})),
      AppError::InvalidFields(fields) => builder.json(json!({"error": "Invalid input.", "fields": fields})),
      AppError::Auth(m) => builder
        .insert_header(("WWW-Authenticate", "Token"))
        .json(json!({"error": m})),
      AppError::Config(m) => builder.json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Sqlx(_) => builder.json(json!({"error": "Database operation failed"})),
      AppError::Cart(_) => builder.json(json!({"error": "Cart could not be updated"})),
      AppError::Internal(m) => builder.json(json!({"error": "An internal error occurred", "detail": m})),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
