//! Domain Module
//!
//! Coupon and cart types shared by the evaluator, the engine and the API.

mod cart;
mod coupon;

pub use cart::{Cart, CartItem};
pub use coupon::{Coupon, DiscountType, NewCoupon, ValidationError};
