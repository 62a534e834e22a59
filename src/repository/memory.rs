//! In-memory coupon repository used by the server binary and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CouponRepository, StorageError};
use crate::domain::Coupon;

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    coupons: RwLock<HashMap<String, Coupon>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with `coupons`; later duplicates win.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let coupons = coupons
            .into_iter()
            .map(|coupon| (coupon.code.clone(), coupon))
            .collect();
        Self {
            coupons: RwLock::new(coupons),
        }
    }

    pub async fn len(&self) -> usize {
        self.coupons.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.coupons.read().await.is_empty()
    }
}

#[async_trait]
impl CouponRepository for InMemoryRepository {
    async fn create_coupon(&self, coupon: Coupon) -> Result<(), StorageError> {
        let mut coupons = self.coupons.write().await;
        if coupons.contains_key(&coupon.code) {
            return Err(StorageError::DuplicateCode(coupon.code));
        }
        coupons.insert(coupon.code.clone(), coupon);
        Ok(())
    }

    /// Returns every coupon ordered by code.
    async fn get_all_coupons(&self) -> Result<Vec<Coupon>, StorageError> {
        let mut all: Vec<Coupon> = self.coupons.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }

    async fn find_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, StorageError> {
        Ok(self.coupons.read().await.get(code).cloned())
    }

    async fn update_coupon(&self, coupon: Coupon) -> Result<(), StorageError> {
        self.coupons
            .write()
            .await
            .insert(coupon.code.clone(), coupon);
        Ok(())
    }
}
