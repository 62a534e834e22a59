//! Coupon records and the creation payload.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => f.write_str("percentage"),
            DiscountType::Fixed => f.write_str("fixed"),
        }
    }
}

/// A persisted discount coupon, identified by its unique `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_value: Decimal,
    /// Upper bound on the discount amount; zero means uncapped
    pub max_discount: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub usage_limit: u32,
    pub usage_count: u32,
    pub is_active: bool,
    /// Item identifiers the coupon applies to; empty means store-wide
    #[serde(default)]
    pub applicable_items: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    pub fn is_store_wide(&self) -> bool {
        self.applicable_items.is_empty()
    }

    pub fn applies_to_item(&self, item_id: &str) -> bool {
        self.is_store_wide() || self.applicable_items.contains(item_id)
    }

    pub fn remaining_uses(&self) -> u32 {
        self.usage_limit.saturating_sub(self.usage_count)
    }

    pub fn is_exhausted(&self) -> bool {
        self.usage_count >= self.usage_limit
    }

    /// Records one redemption.
    pub fn redeem(&mut self, now: DateTime<Utc>) {
        self.usage_count += 1;
        self.updated_at = now;
    }
}

// == Validation Error ==
/// Why a coupon creation request was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("coupon code already exists: {0}")]
    CodeExists(String),

    #[error("coupon code must not be empty")]
    EmptyCode,

    #[error("discount value must be greater than zero")]
    NonPositiveDiscount,

    #[error("percentage discount cannot exceed 100")]
    PercentageTooLarge,

    #[error("minimum order value must not be negative")]
    NegativeMinOrderValue,

    #[error("maximum discount must not be negative")]
    NegativeMaxDiscount,

    #[error("usage limit must be greater than zero")]
    NonPositiveUsageLimit,

    #[error("start date must not be after end date")]
    InvalidDateRange,
}

/// Payload for creating a coupon. Usage count and timestamps are stamped by
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub min_order_value: Decimal,
    #[serde(default)]
    pub max_discount: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub usage_limit: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub applicable_items: BTreeSet<String>,
}

fn default_active() -> bool {
    true
}

impl NewCoupon {
    /// Checks the coupon invariants, reporting the first violation.
    ///
    /// Code uniqueness needs the repository and is checked by the engine.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        if self.discount_value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveDiscount);
        }
        if self.discount_type == DiscountType::Percentage
            && self.discount_value > Decimal::ONE_HUNDRED
        {
            return Err(ValidationError::PercentageTooLarge);
        }
        if self.min_order_value < Decimal::ZERO {
            return Err(ValidationError::NegativeMinOrderValue);
        }
        if self.max_discount < Decimal::ZERO {
            return Err(ValidationError::NegativeMaxDiscount);
        }
        if self.usage_limit == 0 {
            return Err(ValidationError::NonPositiveUsageLimit);
        }
        if self.start_date > self.end_date {
            return Err(ValidationError::InvalidDateRange);
        }
        Ok(())
    }

    /// Builds the stored record with zero usage and a trimmed code.
    pub fn into_coupon(self, now: DateTime<Utc>) -> Coupon {
        Coupon {
            code: self.code.trim().to_string(),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_order_value: self.min_order_value,
            max_discount: self.max_discount,
            start_date: self.start_date,
            end_date: self.end_date,
            usage_limit: self.usage_limit,
            usage_count: 0,
            is_active: self.is_active,
            applicable_items: self.applicable_items,
            created_at: now,
            updated_at: now,
        }
    }
}
