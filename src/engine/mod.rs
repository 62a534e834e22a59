//! Engine Module
//!
//! The coupon engine and the pieces it is built from: request fingerprints,
//! validation outcomes and the per-code lock table.

pub mod fingerprint;
mod locks;
mod outcome;
mod service;

pub use locks::{CodeGuard, CodeLocks};
pub use outcome::{CachedResult, InvalidReason, ValidationOutcome};
pub use service::{CouponEngine, DEFAULT_REPOSITORY_TIMEOUT, DEFAULT_REPOSITORY_TIMEOUT_MS};
