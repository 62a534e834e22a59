//! Coupon Engine
//!
//! Orchestrates the result cache, the repository and the eligibility rules.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{BoundedCache, CacheStats};
use crate::config::Config;
use crate::domain::{Cart, Coupon, NewCoupon, ValidationError};
use crate::eligibility::{evaluate, evaluate_at, parse_evaluation_time, DiscountInfo, Eligibility};
use crate::engine::fingerprint::{self, APPLICABLE_PREFIX};
use crate::engine::{CachedResult, CodeLocks, InvalidReason, ValidationOutcome};
use crate::error::{CouponError, Result};
use crate::repository::{CouponRepository, StorageError};

/// Per-call repository deadline used when none is configured, in milliseconds
pub const DEFAULT_REPOSITORY_TIMEOUT_MS: u64 = 2000;

pub const DEFAULT_REPOSITORY_TIMEOUT: Duration =
    Duration::from_millis(DEFAULT_REPOSITORY_TIMEOUT_MS);

// == Coupon Engine ==
/// Serves applicable-coupon lookups, validates and redeems coupons, and
/// creates new ones.
///
/// # Locking
/// - `locks`: one mutex per coupon code around lookup, eligibility check,
///   usage increment, persist and caching of the positive outcome
/// - `catalog`: shared while an applicable list is fetched and cached,
///   exclusive while the coupon set changes in a way that invalidates those
///   lists (creation, exhausting redemption)
///
/// Lock order is code lock, then catalog.
pub struct CouponEngine {
    repository: Arc<dyn CouponRepository>,
    cache: BoundedCache<CachedResult>,
    locks: CodeLocks,
    catalog: RwLock<()>,
    repository_timeout: Duration,
}

impl CouponEngine {
    // == Constructor ==
    pub fn new(repository: Arc<dyn CouponRepository>, cache: BoundedCache<CachedResult>) -> Self {
        Self {
            repository,
            cache,
            locks: CodeLocks::new(),
            catalog: RwLock::new(()),
            repository_timeout: DEFAULT_REPOSITORY_TIMEOUT,
        }
    }

    /// Builds an engine with a fresh cache sized and timed from `config`.
    pub fn from_config(repository: Arc<dyn CouponRepository>, config: &Config) -> Self {
        Self::new(repository, BoundedCache::new(config.cache_capacity))
            .with_repository_timeout(config.repository_timeout())
    }

    pub fn with_repository_timeout(mut self, timeout: Duration) -> Self {
        self.repository_timeout = timeout;
        self
    }

    pub fn cache(&self) -> &BoundedCache<CachedResult> {
        &self.cache
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    // == Get Applicable Coupons ==
    /// Returns every coupon that applies to `cart` at `at` (RFC 3339).
    ///
    /// Results are memoized per request fingerprint. An unparsable `at`
    /// yields an empty list.
    ///
    /// Cached lists hold the coupons as they were when the list was built.
    /// Redemptions that leave a coupon usable do not refresh them, so
    /// `usage_count` in a cached list may lag behind storage; a redemption
    /// that exhausts a coupon drops every cached list.
    pub async fn get_applicable_coupons(&self, cart: &Cart, at: &str) -> Result<Vec<Coupon>> {
        let key = fingerprint::applicable_key(cart, at);

        if let Some(CachedResult::Applicable(coupons)) = self.cache.get(&key).await {
            debug!("Applicable coupons served from cache ({} coupons)", coupons.len());
            return Ok(coupons);
        }

        let Some(evaluation_time) = parse_evaluation_time(at) else {
            debug!("Unparsable evaluation time {:?}, no coupon applies", at);
            return Ok(Vec::new());
        };

        let _catalog = self.catalog.read().await;

        let all = self
            .with_deadline("get_all_coupons", self.repository.get_all_coupons())
            .await?;
        let total = all.len();
        let applicable: Vec<Coupon> = all
            .into_iter()
            .filter(|coupon| evaluate(coupon, cart, evaluation_time).is_eligible())
            .collect();

        debug!("{} of {} coupons applicable", applicable.len(), total);
        self.cache
            .set(key, CachedResult::Applicable(applicable.clone()))
            .await;

        Ok(applicable)
    }

    // == Validate Coupon ==
    /// Validates `code` against `cart` at `at` and redeems it on success.
    ///
    /// A successful validation increments the coupon's usage count exactly
    /// once and persists it before the outcome is cached. Repeating the exact
    /// same request replays the cached outcome without another redemption.
    pub async fn validate_coupon(
        &self,
        code: &str,
        cart: &Cart,
        at: &str,
    ) -> Result<ValidationOutcome> {
        let code = code.trim();
        let key = fingerprint::validation_key(code, cart, at);

        if let Some(CachedResult::Validation(outcome)) = self.cache.get(&key).await {
            debug!("Validation of {} served from cache", code);
            return Ok(outcome);
        }

        let _code_guard = self.locks.lock(code).await;

        // An identical request may have redeemed while we waited for the lock
        if let Some(CachedResult::Validation(outcome)) = self.cache.get(&key).await {
            debug!("Validation of {} served from cache after lock wait", code);
            return Ok(outcome);
        }

        let Some(mut coupon) = self
            .with_deadline("find_coupon_by_code", self.repository.find_coupon_by_code(code))
            .await?
        else {
            debug!("Coupon {} not found", code);
            return Ok(ValidationOutcome::invalid(InvalidReason::NotFound));
        };

        if let Eligibility::NotApplicable(reason) = evaluate_at(&coupon, cart, at) {
            debug!("Coupon {} rejected: {}", code, reason);
            return Ok(ValidationOutcome::invalid(InvalidReason::NotApplicable(
                reason,
            )));
        }

        let discount = DiscountInfo::compute(&coupon, cart);
        coupon.redeem(Utc::now());
        let usage = (
            coupon.usage_count,
            coupon.usage_limit,
            coupon.remaining_uses(),
        );

        if coupon.is_exhausted() {
            let _catalog = self.catalog.write().await;
            self.with_deadline("update_coupon", self.repository.update_coupon(coupon))
                .await?;
            let removed = self.cache.invalidate_prefix(APPLICABLE_PREFIX).await;
            info!(
                "Coupon {} reached its usage limit, invalidated {} applicable-coupon entries",
                code, removed
            );
        } else {
            self.with_deadline("update_coupon", self.repository.update_coupon(coupon))
                .await?;
        }

        info!(
            "Coupon {} redeemed ({}/{}, {} remaining), discount {}",
            code, usage.0, usage.1, usage.2, discount.discount_amount
        );

        let outcome = ValidationOutcome::Valid { discount };
        self.cache
            .set(key, CachedResult::Validation(outcome.clone()))
            .await;

        Ok(outcome)
    }

    // == Create Coupon ==
    /// Validates and stores a new coupon, then drops every cached
    /// applicable-coupons list.
    ///
    /// The code is stored trimmed, the same form `validate_coupon` looks up.
    pub async fn create_coupon(&self, new_coupon: NewCoupon) -> Result<Coupon> {
        new_coupon.validate()?;
        let coupon = new_coupon.into_coupon(Utc::now());

        let _catalog = self.catalog.write().await;

        if self
            .with_deadline(
                "find_coupon_by_code",
                self.repository.find_coupon_by_code(&coupon.code),
            )
            .await?
            .is_some()
        {
            return Err(ValidationError::CodeExists(coupon.code).into());
        }

        match self
            .with_deadline("create_coupon", self.repository.create_coupon(coupon.clone()))
            .await
        {
            Ok(()) => {}
            Err(CouponError::Storage(StorageError::DuplicateCode(code))) => {
                return Err(ValidationError::CodeExists(code).into());
            }
            Err(err) => return Err(err),
        }

        let removed = self.cache.invalidate_prefix(APPLICABLE_PREFIX).await;
        info!(
            "Coupon {} created, invalidated {} applicable-coupon entries",
            coupon.code, removed
        );

        Ok(coupon)
    }

    // == Deadline ==
    /// Runs a repository call under the configured deadline.
    ///
    /// Expiry drops the call and reports `Timeout`; storage errors pass
    /// through unchanged.
    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = std::result::Result<T, StorageError>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.repository_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!("Repository {} failed: {}", operation, err);
                Err(err.into())
            }
            Err(_) => {
                warn!(
                    "Repository {} exceeded deadline of {:?}",
                    operation, self.repository_timeout
                );
                Err(CouponError::Timeout { operation })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartItem;
    use crate::repository::InMemoryRepository;
    use rust_decimal_macros::dec;

    fn engine() -> CouponEngine {
        CouponEngine::new(Arc::new(InMemoryRepository::new()), BoundedCache::new(16))
    }

    #[tokio::test]
    async fn test_unknown_codes_leave_no_lock_entries() {
        let engine = engine();
        let cart = Cart::new(vec![CartItem::new("item1", dec!(150))], dec!(150));
        let at = Utc::now().to_rfc3339();

        for n in 0..500 {
            let outcome = engine
                .validate_coupon(&format!("NOPE{}", n), &cart, &at)
                .await
                .unwrap();
            assert_eq!(outcome.reason(), Some(InvalidReason::NotFound));
        }

        assert!(engine.locks.is_empty());
    }

    #[tokio::test]
    async fn test_default_deadline_matches_config() {
        let engine = CouponEngine::from_config(
            Arc::new(InMemoryRepository::new()),
            &Config::default(),
        );

        assert_eq!(engine.repository_timeout, DEFAULT_REPOSITORY_TIMEOUT);
    }
}
