//! Validation outcomes and cached engine results.

use std::fmt;

use crate::domain::Coupon;
use crate::eligibility::{DiscountInfo, IneligibleReason};

/// Why a validation did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NotFound,
    NotApplicable(IneligibleReason),
}

impl InvalidReason {
    pub fn message(&self) -> &'static str {
        match self {
            InvalidReason::NotFound => "coupon not found",
            InvalidReason::NotApplicable(_) => "coupon expired or not applicable",
        }
    }

    /// Failing eligibility rule, when there is one.
    pub fn detail(&self) -> Option<IneligibleReason> {
        match self {
            InvalidReason::NotFound => None,
            InvalidReason::NotApplicable(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// == Validation Outcome ==
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid { discount: DiscountInfo },
    Invalid { reason: InvalidReason },
}

impl ValidationOutcome {
    pub fn invalid(reason: InvalidReason) -> Self {
        ValidationOutcome::Invalid { reason }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationOutcome::Valid { .. } => None,
            ValidationOutcome::Invalid { reason } => Some(*reason),
        }
    }

    pub fn discount(&self) -> Option<&DiscountInfo> {
        match self {
            ValidationOutcome::Valid { discount } => Some(discount),
            ValidationOutcome::Invalid { .. } => None,
        }
    }
}

/// Value stored in the engine's result cache.
#[derive(Debug, Clone)]
pub enum CachedResult {
    Applicable(Vec<Coupon>),
    Validation(ValidationOutcome),
}
