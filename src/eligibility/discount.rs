//! Discount computation for an eligible coupon.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Cart, Coupon, DiscountType};

/// Discount granted by a successful validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountInfo {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_amount: Decimal,
    pub order_total: Decimal,
    pub final_total: Decimal,
}

impl DiscountInfo {
    /// Computes the discount of `coupon` on `cart`.
    ///
    /// The amount never exceeds the eligible subtotal, the positive
    /// `max_discount` cap or the cart total, and is rounded to cents.
    /// Sums and products beyond `Decimal::MAX` saturate.
    pub fn compute(coupon: &Coupon, cart: &Cart) -> Self {
        let subtotal = eligible_subtotal(coupon, cart);

        let raw = match coupon.discount_type {
            DiscountType::Percentage => {
                subtotal.saturating_mul(coupon.discount_value / Decimal::ONE_HUNDRED)
            }
            DiscountType::Fixed => coupon.discount_value,
        };

        let mut amount = raw.min(subtotal);
        if coupon.max_discount > Decimal::ZERO {
            amount = amount.min(coupon.max_discount);
        }
        let amount = amount.min(cart.total).max(Decimal::ZERO).round_dp(2);

        Self {
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_amount: amount,
            order_total: cart.total,
            final_total: cart.total.saturating_sub(amount),
        }
    }
}

/// Value of the cart the coupon covers.
fn eligible_subtotal(coupon: &Coupon, cart: &Cart) -> Decimal {
    if coupon.is_store_wide() {
        return cart.total;
    }
    cart.items
        .iter()
        .filter(|item| coupon.applies_to_item(&item.id))
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.price))
}
