// cartshop/src/money.rs

//! Decimal helpers for currency amounts.
//!
//! All cart arithmetic is done on [`Decimal`] so sums of typical prices
//! (`13.99 * 2 + 5.00`) stay exact. Floats never enter the picture.
//! Totals keep every digit; rounding to cents happens only when an amount is
//! rendered (see [`serialize_rounded`]).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Number of fractional digits used when reporting amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds half away from zero to two places and pins the scale, so zero
/// renders as `0.00` and `27.980` as `27.98`.
pub fn to_money(amount: Decimal) -> Decimal {
  let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(MONEY_SCALE);
  rounded
}

/// Pads `amount` to at least two fractional digits. Never drops a digit:
/// `5` becomes `5.00`, `3.777` stays `3.777`.
pub fn exact(mut amount: Decimal) -> Decimal {
  if amount.scale() < MONEY_SCALE {
    amount.rescale(MONEY_SCALE);
  }
  amount
}

/// `quantity * unit_price`, exact. Saturates at the `Decimal` range instead
/// of panicking.
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
  unit_price.saturating_mul(Decimal::from(quantity))
}

/// Exact sum of `amounts`, saturating like [`line_total`].
pub fn sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
  exact(amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add))
}

/// `serialize_with` helper: renders an exact amount rounded to cents.
pub fn serialize_rounded<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
  Serialize::serialize(&to_money(*amount), serializer)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
  }

  #[test]
  fn to_money_pins_scale() {
    assert_eq!(to_money(Decimal::ZERO).to_string(), "0.00");
    assert_eq!(to_money(d("27.980")).to_string(), "27.98");
    assert_eq!(to_money(d("5")).to_string(), "5.00");
    assert_eq!(to_money(d("0.005")).to_string(), "0.01");
  }

  #[test]
  fn exact_pads_without_rounding() {
    assert_eq!(exact(Decimal::ZERO).to_string(), "0.00");
    assert_eq!(exact(d("5")).to_string(), "5.00");
    assert_eq!(exact(d("3.777")).to_string(), "3.777");
  }

  #[test]
  fn line_total_is_exact() {
    assert_eq!(line_total(3, d("0.10")), d("0.30"));
    assert_eq!(line_total(2, d("13.99")), d("27.98"));
    assert_eq!(line_total(3, d("1.259")), d("3.777"));
  }

  #[test]
  fn overflow_saturates() {
    assert_eq!(line_total(u32::MAX, Decimal::MAX), Decimal::MAX);
    assert_eq!(sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
  }

  #[test]
  fn sum_keeps_sub_cent_digits() {
    assert_eq!(sum([d("0.005"), d("0.005")]), d("0.010"));
    assert_eq!(sum(Vec::new()).to_string(), "0.00");
  }
}
