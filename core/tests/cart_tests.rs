// tests/cart_tests.rs
mod common;

use cartshop::{Cart, MemorySession, ProductId, SessionStore, DEFAULT_CART_SESSION_KEY};
use common::*;
use serial_test::serial;

#[test]
#[serial]
fn test_merge_adds_sum_quantities() {
  setup_tracing();
  let session = MemorySession::new();
  let mut cart = Cart::new(session.clone());
  let shirt = product(1, "Super shirt", "13.99");

  for n in [1, 4, 2, 7] {
    cart.add(&shirt, qty(n), false).unwrap();
  }

  assert_eq!(cart.get(ProductId(1)).unwrap().quantity.get(), 14);
  assert_eq!(cart.len(), 1);
  assert_eq!(cart.total_quantity(), 14);
}

#[test]
#[serial]
fn test_replace_quantity_overwrites() {
  setup_tracing();
  let mut cart = Cart::new(MemorySession::new());
  let shirt = product(1, "Super shirt", "13.99");

  cart.add(&shirt, qty(3), false).unwrap();
  cart.add(&shirt, qty(5), true).unwrap();

  assert_eq!(cart.get(ProductId(1)).unwrap().quantity.get(), 5);
}

#[test]
#[serial]
fn test_replace_on_new_line_sets_quantity() {
  setup_tracing();
  let mut cart = Cart::new(MemorySession::new());
  cart.add(&product(9, "Socks", "2.00"), qty(4), true).unwrap();
  assert_eq!(cart.total_quantity(), 4);
}

#[test]
#[serial]
fn test_total_price_is_exact() {
  setup_tracing();
  let mut cart = Cart::new(MemorySession::new());
  // Classic binary floating point trouble makers.
  cart.add(&product(1, "a", "0.10"), qty(3), false).unwrap();
  cart.add(&product(2, "b", "0.20"), qty(1), false).unwrap();
  cart.add(&product(3, "c", "19.99"), qty(20), false).unwrap();

  assert_eq!(cart.total_price(), dec("400.30"));
  assert_eq!(cart.total_price().to_string(), "400.30");
}

#[test]
#[serial]
fn test_total_price_keeps_sub_cent_digits() {
  setup_tracing();
  let mut cart = Cart::new(MemorySession::new());
  cart.add(&product(1, "bolt", "1.259"), qty(3), false).unwrap();
  assert_eq!(cart.total_price(), dec("3.777"));
  assert_eq!(cart.total_price().to_string(), "3.777");

  let mut washers = Cart::new(MemorySession::new());
  washers.add(&product(1, "washer", "0.005"), qty(1), false).unwrap();
  washers.add(&product(2, "nut", "0.005"), qty(1), false).unwrap();
  assert_eq!(washers.total_price(), dec("0.010"));
}

#[test]
#[serial]
fn test_remove_missing_line_is_noop_and_clean() {
  setup_tracing();
  let session = MemorySession::new();
  let mut cart = Cart::new(session.clone());
  cart.add(&product(1, "a", "1.00"), qty(1), false).unwrap();
  session.reset_modified();

  let removed = cart.remove(&product(2, "b", "1.00")).unwrap();

  assert!(!removed);
  assert!(!session.is_modified());
  assert_eq!(cart.total_quantity(), 1);
}

#[test]
#[serial]
fn test_remove_existing_line_marks_dirty() {
  setup_tracing();
  let session = MemorySession::new();
  let mut cart = Cart::new(session.clone());
  let a = product(1, "a", "1.00");
  cart.add(&a, qty(1), false).unwrap();
  session.reset_modified();

  assert!(cart.remove(&a).unwrap());
  assert!(session.is_modified());
  assert!(cart.is_empty());
}

#[test]
#[serial]
fn test_add_marks_session_dirty_and_persists() {
  setup_tracing();
  let session = MemorySession::new();
  let mut cart = Cart::new(session.clone());
  assert!(!session.is_modified());

  cart.add(&product(1, "a", "13.99"), qty(2), false).unwrap();

  assert!(session.is_modified());
  let stored = session.load(DEFAULT_CART_SESSION_KEY).unwrap().unwrap();
  assert_eq!(stored.total_quantity(), 2);
}

#[test]
#[serial]
fn test_clear_then_reconstruct_is_empty() {
  setup_tracing();
  let session = MemorySession::new();
  let mut cart = Cart::new(session.clone());
  cart.add(&product(1, "a", "13.99"), qty(2), false).unwrap();
  session.reset_modified();

  cart.clear();

  assert!(session.is_modified());
  assert!(!session.contains_key(DEFAULT_CART_SESSION_KEY));

  let fresh = Cart::new(session.clone());
  assert_eq!(fresh.total_quantity(), 0);
  assert_eq!(fresh.lines().count(), 0);
  assert_eq!(fresh.total_price().to_string(), "0.00");
}

#[test]
#[serial]
fn test_reference_scenario() {
  setup_tracing();
  let session = MemorySession::new();
  let a = product(1, "A", "13.99");
  let b = product(2, "B", "5.00");

  // Each step uses a fresh cart, the way each request would.
  Cart::new(session.clone()).add(&a, qty(2), false).unwrap();
  let cart = Cart::new(session.clone());
  assert_eq!(cart.total_quantity(), 2);
  assert_eq!(cart.total_price(), dec("27.98"));

  Cart::new(session.clone()).add(&b, qty(1), false).unwrap();
  let cart = Cart::new(session.clone());
  assert_eq!(cart.total_quantity(), 3);
  assert_eq!(cart.total_price(), dec("32.98"));

  Cart::new(session.clone()).add(&a, qty(1), true).unwrap();
  let cart = Cart::new(session.clone());
  assert_eq!(cart.total_quantity(), 2);
  assert_eq!(cart.total_price(), dec("18.99"));

  assert!(Cart::new(session.clone()).remove(&b).unwrap());
  let cart = Cart::new(session.clone());
  assert_eq!(cart.total_quantity(), 1);
  assert_eq!(cart.total_price(), dec("13.99"));

  Cart::new(session.clone()).clear();
  let cart = Cart::new(session.clone());
  assert_eq!(cart.total_quantity(), 0);
  assert_eq!(cart.total_price().to_string(), "0.00");
}

#[test]
#[serial]
fn test_price_snapshot_survives_catalog_change() {
  setup_tracing();
  let session = MemorySession::new();
  let mut a = product(1, "A", "13.99");
  Cart::new(session.clone()).add(&a, qty(1), false).unwrap();

  a.price = dec("20.00");
  let mut cart = Cart::new(session.clone());
  cart.add(&a, qty(1), false).unwrap();
  assert_eq!(cart.get(ProductId(1)).unwrap().unit_price, dec("13.99"));
  assert_eq!(cart.total_price(), dec("27.98"));

  // Only remove + re-add picks up the new price.
  cart.remove(&a).unwrap();
  cart.add(&a, qty(1), false).unwrap();
  assert_eq!(cart.get(ProductId(1)).unwrap().unit_price, dec("20.00"));
}

#[test]
#[serial]
fn test_corrupt_session_slot_starts_empty() {
  setup_tracing();
  let session = MemorySession::new();
  session.insert_raw(DEFAULT_CART_SESSION_KEY, serde_json::json!({"1": {"quantity": "lots"}}));

  let cart = Cart::new(session.clone());

  assert!(cart.is_empty());
  assert!(session.load(DEFAULT_CART_SESSION_KEY).unwrap().unwrap().is_empty());
}

#[test]
#[serial]
fn test_lines_keep_insertion_order_across_requests() {
  setup_tracing();
  let session = MemorySession::new();
  for (id, price) in [(5, "1.00"), (2, "2.00"), (8, "3.00")] {
    Cart::new(session.clone()).add(&product(id, "x", price), qty(1), false).unwrap();
  }

  let cart = Cart::new(session);
  let ids: Vec<i64> = cart.lines().map(|(id, _)| id.get()).collect();
  assert_eq!(ids, vec![5, 2, 8]);
}
