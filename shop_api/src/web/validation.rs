// shop_api/src/web/validation.rs

//! Field-by-field validation of JSON request bodies.
//!
//! Payloads are taken as raw JSON objects so that every bad field is
//! reported at once, as `{"field": ["message"]}`, instead of failing on the
//! first serde error.

use crate::errors::{AppError, FieldErrors, Result};
use crate::models::NewCategory;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const REQUIRED: &str = "This field is required.";
pub const SLUG_MAX_LEN: usize = 200;
pub const NAME_MAX_LEN: usize = 200;
const PRICE_MAX_DIGITS: u32 = 10;
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Validation state over one JSON object.
///
/// A `partial` form (PATCH) skips missing fields instead of reporting them
/// as required.
pub struct Form<'a> {
  data: &'a Map<String, Value>,
  partial: bool,
  prefix: String,
  errors: FieldErrors,
}

impl<'a> Form<'a> {
  pub fn new(body: &'a Value, partial: bool) -> Result<Self> {
    match body {
      Value::Object(data) => Ok(Self {
        data,
        partial,
        prefix: String::new(),
        errors: FieldErrors::new(),
      }),
      other => Err(AppError::Validation(format!(
        "Invalid data. Expected a dictionary, but got {}.",
        json_type(other)
      ))),
    }
  }

  fn error(&mut self, field: &str, message: impl Into<String>) {
    let key = format!("{}{}", self.prefix, field);
    self.errors.add(&key, message);
  }

  /// The raw value of `field`; records "required" when it must be present.
  fn take(&mut self, field: &str, required: bool) -> Option<&'a Value> {
    match self.data.get(field) {
      Some(Value::Null) | None => {
        if required && !self.partial {
          self.error(field, REQUIRED);
        }
        None
      }
      Some(value) => Some(value),
    }
  }

  /// Required non-blank string of at most `max_len` characters.
  pub fn string(&mut self, field: &str, max_len: usize) -> Option<String> {
    let value = self.take(field, true)?;
    let Value::String(raw) = value else {
      self.error(field, "Not a valid string.");
      return None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      self.error(field, "This field may not be blank.");
      return None;
    }
    if trimmed.chars().count() > max_len {
      self.error(field, format!("Ensure this field has no more than {} characters.", max_len));
      return None;
    }
    Some(trimmed.to_string())
  }

  /// Optional free text; blank is allowed.
  pub fn text(&mut self, field: &str) -> Option<String> {
    match self.take(field, false)? {
      Value::String(raw) => Some(raw.trim().to_string()),
      _ => {
        self.error(field, "Not a valid string.");
        None
      }
    }
  }

  pub fn slug(&mut self, field: &str) -> Option<String> {
    let slug = self.string(field, SLUG_MAX_LEN)?;
    if !is_slug(&slug) {
      self.error(
        field,
        "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.",
      );
      return None;
    }
    Some(slug)
  }

  /// Required integer, given as a JSON number or a numeric string.
  pub fn integer(&mut self, field: &str) -> Option<i64> {
    let value = self.take(field, true)?;
    let parsed = match value {
      Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
      Value::String(s) => s.trim().parse::<i64>().ok(),
      _ => None,
    };
    if parsed.is_none() {
      self.error(field, "A valid integer is required.");
    }
    parsed
  }

  /// Required integer restricted to `choices`.
  pub fn choice(&mut self, field: &str, choices: RangeInclusive<u32>) -> Option<u32> {
    let value = self.take(field, true)?;
    let (shown, parsed) = match value {
      Value::Number(n) => (n.to_string(), n.as_u64()),
      Value::String(s) => (s.clone(), s.parse::<u64>().ok()),
      other => (other.to_string(), None),
    };
    match parsed.and_then(|n| u32::try_from(n).ok()).filter(|n| choices.contains(n)) {
      Some(n) => Some(n),
      None => {
        self.error(field, format!("\"{}\" is not a valid choice.", shown));
        None
      }
    }
  }

  /// Required non-negative amount with at most two decimal places.
  pub fn price(&mut self, field: &str) -> Option<Decimal> {
    let value = self.take(field, true)?;
    let parsed = match value {
      Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
      Value::String(s) => Decimal::from_str(s.trim()).ok(),
      _ => None,
    };
    let Some(price) = parsed else {
      self.error(field, "A valid number is required.");
      return None;
    };
    let price = price.normalize();
    if price.is_sign_negative() {
      self.error(field, "Ensure this value is greater than or equal to 0.");
      return None;
    }
    if price.scale() > PRICE_DECIMAL_PLACES {
      self.error(
        field,
        format!("Ensure that there are no more than {} decimal places.", PRICE_DECIMAL_PLACES),
      );
      return None;
    }
    let integer_digits = price.trunc().to_string().trim_start_matches('0').len() as u32;
    if integer_digits > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
      self.error(
        field,
        format!(
          "Ensure that there are no more than {} digits before the decimal point.",
          PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES
        ),
      );
      return None;
    }
    Some(cartshop::money::to_money(price))
  }

  /// Optional boolean; accepts JSON booleans and the usual string spellings.
  pub fn boolean(&mut self, field: &str) -> Option<bool> {
    let parsed = match self.take(field, false)? {
      Value::Bool(b) => Some(*b),
      Value::Number(n) => match n.as_i64() {
        Some(1) => Some(true),
        Some(0) => Some(false),
        _ => None,
      },
      Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
      },
      _ => None,
    };
    if parsed.is_none() {
      self.error(field, "Must be a valid boolean.");
    }
    parsed
  }

  /// Nested `{name, slug}` category object.
  pub fn category(&mut self, field: &str) -> Option<NewCategory> {
    let value = self.take(field, true)?;
    let Value::Object(data) = value else {
      self.error(
        field,
        format!("Invalid data. Expected a dictionary, but got {}.", json_type(value)),
      );
      return None;
    };
    let mut nested = Form {
      data,
      partial: false,
      prefix: format!("{}{}.", self.prefix, field),
      errors: FieldErrors::new(),
    };
    let name = nested.string("name", NAME_MAX_LEN);
    let slug = nested.slug("slug");
    self.errors.extend(nested.errors);
    Some(NewCategory { name: name?, slug: slug? })
  }

  /// Every collected error, or the built value when all fields passed.
  pub fn finish<T>(self, value: Option<T>) -> Result<T> {
    let value = self.errors.into_result(value)?;
    value.ok_or_else(|| AppError::Validation("Invalid input.".to_string()))
  }
}

pub fn is_slug(value: &str) -> bool {
  !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "str",
    Value::Array(_) => "list",
    Value::Object(_) => "dict",
  }
}
