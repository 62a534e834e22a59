//! Coupon Engine - coupon eligibility and redemption service
//!
//! Finds the coupons that apply to a shopping cart, validates and redeems
//! coupon codes, and memoizes results in a bounded LRU cache that is safe
//! under concurrent access.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;

pub use api::AppState;
pub use config::Config;
pub use engine::{CouponEngine, ValidationOutcome};
pub use error::{CouponError, Result};
