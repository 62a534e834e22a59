//! Cache Module
//!
//! Bounded in-memory result cache with least-recently-used eviction.

mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use lru::LruTracker;
pub use shared::BoundedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100;
