//! Eligibility Evaluator
//!
//! Pure rule checks deciding whether a coupon applies to a cart at a given
//! instant. Rules run in a fixed order and stop at the first failure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Cart, Coupon};

// == Ineligible Reason ==
/// First rule a coupon failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    Inactive,
    NotYetValid,
    Expired,
    BelowMinimumOrder,
    UsageLimitReached,
    NoApplicableItems,
    InvalidTimestamp,
}

impl IneligibleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IneligibleReason::Inactive => "inactive",
            IneligibleReason::NotYetValid => "not_yet_valid",
            IneligibleReason::Expired => "expired",
            IneligibleReason::BelowMinimumOrder => "below_minimum_order",
            IneligibleReason::UsageLimitReached => "usage_limit_reached",
            IneligibleReason::NoApplicableItems => "no_applicable_items",
            IneligibleReason::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Eligibility ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    NotApplicable(IneligibleReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn reason(&self) -> Option<IneligibleReason> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::NotApplicable(reason) => Some(*reason),
        }
    }
}

/// Parses an RFC 3339 evaluation timestamp. Returns None when unparsable.
pub fn parse_evaluation_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

// == Evaluate ==
/// Runs the eligibility rules in order:
///
/// 1. the coupon is active
/// 2. `at` lies within `[start_date, end_date]`
/// 3. the cart total reaches the minimum order value
/// 4. usage is strictly below the limit
/// 5. some cart item is covered by the coupon (store-wide coupons cover all)
pub fn evaluate(coupon: &Coupon, cart: &Cart, at: DateTime<Utc>) -> Eligibility {
    use IneligibleReason::*;

    if !coupon.is_active {
        return Eligibility::NotApplicable(Inactive);
    }
    if at < coupon.start_date {
        return Eligibility::NotApplicable(NotYetValid);
    }
    if at > coupon.end_date {
        return Eligibility::NotApplicable(Expired);
    }
    if cart.total < coupon.min_order_value {
        return Eligibility::NotApplicable(BelowMinimumOrder);
    }
    if coupon.usage_count >= coupon.usage_limit {
        return Eligibility::NotApplicable(UsageLimitReached);
    }
    if !coupon.is_store_wide() && !cart.item_ids().any(|id| coupon.applies_to_item(id)) {
        return Eligibility::NotApplicable(NoApplicableItems);
    }
    Eligibility::Eligible
}

/// Same as [`evaluate`] for a raw timestamp; unparsable input fails closed.
pub fn evaluate_at(coupon: &Coupon, cart: &Cart, raw_at: &str) -> Eligibility {
    match parse_evaluation_time(raw_at) {
        Some(at) => evaluate(coupon, cart, at),
        None => Eligibility::NotApplicable(IneligibleReason::InvalidTimestamp),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, DiscountType};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn is_applicable(coupon: &Coupon, cart: &Cart, at: DateTime<Utc>) -> bool {
        evaluate(coupon, cart, at).is_eligible()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn coupon() -> Coupon {
        let now = fixed_now();
        Coupon {
            code: "TEST10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            min_order_value: dec!(100),
            max_discount: dec!(50),
            start_date: now - Duration::hours(1),
            end_date: now + Duration::hours(24),
            usage_limit: 100,
            usage_count: 0,
            is_active: true,
            applicable_items: ["item1".to_string()].into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn cart(total: rust_decimal::Decimal, ids: &[&str]) -> Cart {
        Cart::new(
            ids.iter().map(|id| CartItem::new(*id, total)).collect(),
            total,
        )
    }

    #[test]
    fn test_qualifying_cart_is_eligible() {
        let result = evaluate(&coupon(), &cart(dec!(150), &["item1"]), fixed_now());
        assert_eq!(result, Eligibility::Eligible);
        assert!(result.is_eligible());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn test_inactive_coupon() {
        let mut c = coupon();
        c.is_active = false;
        let result = evaluate(&c, &cart(dec!(150), &["item1"]), fixed_now());
        assert_eq!(result.reason(), Some(IneligibleReason::Inactive));
    }

    #[test]
    fn test_expired_and_not_yet_valid() {
        let c = coupon();
        let basket = cart(dec!(150), &["item1"]);

        let late = c.end_date + Duration::seconds(1);
        let early = c.start_date - Duration::seconds(1);

        assert_eq!(evaluate(&c, &basket, late).reason(), Some(IneligibleReason::Expired));
        assert_eq!(
            evaluate(&c, &basket, early).reason(),
            Some(IneligibleReason::NotYetValid)
        );
    }

    #[test]
    fn test_single_instant_window() {
        let mut c = coupon();
        let t = fixed_now();
        c.start_date = t;
        c.end_date = t;
        let basket = cart(dec!(150), &["item1"]);

        assert!(is_applicable(&c, &basket, t));
        assert!(!is_applicable(&c, &basket, t + Duration::seconds(1)));
        assert!(!is_applicable(&c, &basket, t - Duration::seconds(1)));
    }

    #[test]
    fn test_minimum_order_boundary() {
        let c = coupon();
        assert!(is_applicable(&c, &cart(dec!(100), &["item1"]), fixed_now()));
        assert_eq!(
            evaluate(&c, &cart(dec!(99.99), &["item1"]), fixed_now()).reason(),
            Some(IneligibleReason::BelowMinimumOrder)
        );
    }

    #[test]
    fn test_usage_limit_is_strict() {
        let mut c = coupon();
        c.usage_count = 99;
        assert!(is_applicable(&c, &cart(dec!(150), &["item1"]), fixed_now()));

        c.usage_count = 100;
        assert_eq!(
            evaluate(&c, &cart(dec!(150), &["item1"]), fixed_now()).reason(),
            Some(IneligibleReason::UsageLimitReached)
        );
    }

    #[test]
    fn test_items_must_intersect() {
        let c = coupon();
        assert_eq!(
            evaluate(&c, &cart(dec!(150), &["item2", "item3"]), fixed_now()).reason(),
            Some(IneligibleReason::NoApplicableItems)
        );
        assert!(is_applicable(&c, &cart(dec!(150), &["item2", "item1"]), fixed_now()));
    }

    #[test]
    fn test_store_wide_coupon_matches_any_cart() {
        let mut c = coupon();
        c.applicable_items.clear();

        assert!(is_applicable(&c, &cart(dec!(150), &["anything"]), fixed_now()));
        assert!(is_applicable(&c, &cart(dec!(150), &[]), fixed_now()));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let mut c = coupon();
        c.is_active = false;
        c.usage_count = c.usage_limit;
        let late = c.end_date + Duration::days(1);

        let result = evaluate(&c, &cart(dec!(1), &["nope"]), late);
        assert_eq!(result.reason(), Some(IneligibleReason::Inactive));

        c.is_active = true;
        let result = evaluate(&c, &cart(dec!(1), &["nope"]), late);
        assert_eq!(result.reason(), Some(IneligibleReason::Expired));

        let result = evaluate(&c, &cart(dec!(1), &["nope"]), fixed_now());
        assert_eq!(result.reason(), Some(IneligibleReason::BelowMinimumOrder));
    }

    #[test]
    fn test_unparsable_timestamp_fails_closed() {
        let result = evaluate_at(&coupon(), &cart(dec!(150), &["item1"]), "yesterday-ish");
        assert_eq!(result.reason(), Some(IneligibleReason::InvalidTimestamp));
        assert_eq!(
            evaluate_at(&coupon(), &cart(dec!(150), &["item1"]), "").reason(),
            Some(IneligibleReason::InvalidTimestamp)
        );
    }

    #[test]
    fn test_parse_evaluation_time_normalizes_offsets() {
        let parsed = parse_evaluation_time("2026-06-01T14:00:00+02:00").unwrap();
        assert_eq!(parsed, fixed_now());
        assert!(parse_evaluation_time("2026-06-01").is_none());
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(IneligibleReason::UsageLimitReached.to_string(), "usage_limit_reached");
        assert_eq!(
            serde_json::to_string(&IneligibleReason::NotYetValid).unwrap(),
            "\"not_yet_valid\""
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        // Repeated evaluation of the same inputs gives the same answer.
        #[test]
        fn prop_evaluation_is_deterministic(
            total in 0u32..400,
            offset_secs in -200_000i64..200_000,
            usage_count in 0u32..120,
            active in any::<bool>(),
            item in "item[0-3]",
        ) {
            let mut c = coupon();
            c.usage_count = usage_count;
            c.is_active = active;
            let basket = cart(rust_decimal::Decimal::from(total), &[item.as_str()]);
            let at = fixed_now() + Duration::seconds(offset_secs);

            let first = evaluate(&c, &basket, at);
            for _ in 0..3 {
                prop_assert_eq!(evaluate(&c, &basket, at), first);
            }
            prop_assert_eq!(evaluate_at(&c, &basket, &at.to_rfc3339()), first);
        }
    }
}
