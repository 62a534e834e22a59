//! Request DTOs for the coupon API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Cart, CartItem};

/// Request body for `POST /coupons/applicable`
///
/// # Fields
/// - `items`: Cart items
/// - `total`: Cart total, taken as given
/// - `timestamp`: Optional RFC 3339 evaluation time (defaults to now)
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicableCouponsRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: Decimal,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ApplicableCouponsRequest {
    /// Splits the request into the cart and the evaluation time.
    pub fn into_parts(self) -> (Cart, String) {
        (
            Cart::new(self.items, self.total),
            resolve_timestamp(self.timestamp),
        )
    }
}

/// Request body for `POST /coupons/validate`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateCouponRequest {
    pub code: String,
    pub cart: Cart,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ValidateCouponRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.code.trim().is_empty() {
            return Some("Coupon code cannot be empty".to_string());
        }
        None
    }

    /// Returns the evaluation time, defaulting to the current UTC time.
    pub fn evaluation_time(&self) -> String {
        resolve_timestamp(self.timestamp.clone())
    }
}

fn resolve_timestamp(timestamp: Option<String>) -> String {
    timestamp.unwrap_or_else(|| Utc::now().to_rfc3339())
}
