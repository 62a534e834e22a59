//! Request fingerprints used as cache keys.
//!
//! Every variable-length field is written as `<len>:<text>|`, so two keys are
//! equal only when every field is equal. Decimals are normalized (`150.00`
//! and `150` agree) and parsable timestamps are rendered in canonical UTC.

use chrono::SecondsFormat;
use rust_decimal::Decimal;

use crate::domain::Cart;
use crate::eligibility::parse_evaluation_time;

/// Key prefix of every cached applicable-coupons list
pub const APPLICABLE_PREFIX: &str = "applicable|";

/// Key prefix of every cached validation outcome
pub const VALIDATION_PREFIX: &str = "validate|";

/// Key for `get_applicable_coupons(cart, at)`.
pub fn applicable_key(cart: &Cart, at: &str) -> String {
    let mut key = String::from(APPLICABLE_PREFIX);
    push_cart(&mut key, cart);
    push_time(&mut key, at);
    key
}

/// Key for `validate_coupon(code, cart, at)`.
pub fn validation_key(code: &str, cart: &Cart, at: &str) -> String {
    let mut key = String::from(VALIDATION_PREFIX);
    push_field(&mut key, code);
    push_cart(&mut key, cart);
    push_time(&mut key, at);
    key
}

fn push_field(key: &mut String, value: &str) {
    key.push_str(&value.len().to_string());
    key.push(':');
    key.push_str(value);
    key.push('|');
}

fn push_decimal(key: &mut String, value: &Decimal) {
    push_field(key, &value.normalize().to_string());
}

fn push_cart(key: &mut String, cart: &Cart) {
    push_field(key, &cart.items.len().to_string());
    for item in &cart.items {
        push_field(key, &item.id);
        push_decimal(key, &item.price);
    }
    push_decimal(key, &cart.total);
}

fn push_time(key: &mut String, at: &str) {
    match parse_evaluation_time(at) {
        Some(parsed) => {
            key.push('t');
            push_field(key, &parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
        None => {
            key.push('r');
            push_field(key, at);
        }
    }
}
