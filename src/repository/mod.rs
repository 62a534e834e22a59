//! Repository Module
//!
//! Storage contract the engine consumes, plus an in-memory implementation.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Coupon;

pub use memory::InMemoryRepository;

// == Storage Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A coupon with this code is already stored
    #[error("coupon code already exists: {0}")]
    DuplicateCode(String),

    /// Backend failure (I/O, connection, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// == Coupon Repository ==
/// Persisted coupon records keyed by code.
///
/// Implementations must be safe to share between tasks. The engine applies
/// its own deadline around every call.
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Stores a new coupon. Fails with `DuplicateCode` if the code exists.
    async fn create_coupon(&self, coupon: Coupon) -> Result<(), StorageError>;

    async fn get_all_coupons(&self) -> Result<Vec<Coupon>, StorageError>;

    async fn find_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, StorageError>;

    /// Writes the full record, keyed by code (upsert).
    async fn update_coupon(&self, coupon: Coupon) -> Result<(), StorageError>;
}
