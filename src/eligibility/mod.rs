//! Eligibility Module
//!
//! Pure functions deciding whether a coupon applies to a cart and what it
//! is worth.

mod discount;
mod evaluator;

pub use discount::DiscountInfo;
pub use evaluator::{evaluate, evaluate_at, parse_evaluation_time, Eligibility, IneligibleReason};
