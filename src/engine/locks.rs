//! Per-coupon-code mutual exclusion for the redeem critical section.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lazily created async mutex per coupon code.
///
/// An entry lives only while some task holds or waits for its lock; the
/// last guard to drop removes it, so the table stays as small as the set
/// of codes currently in flight.
#[derive(Debug, Default)]
pub struct CodeLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Exclusive access to one coupon code. Releases the lock on drop.
#[derive(Debug)]
pub struct CodeGuard<'a> {
    code: String,
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl CodeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `code`.
    ///
    /// Cancelling the wait also releases the entry.
    pub async fn lock(&self, code: &str) -> CodeGuard<'_> {
        let mut held = CodeGuard {
            code: code.to_string(),
            locks: &self.locks,
            guard: None,
        };

        // Cloned under the shard lock, so a concurrent release sees this waiter
        let lock = Arc::clone(self.locks.entry(code.to_string()).or_default().value());
        held.guard = Some(lock.lock_owned().await);
        held
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for CodeGuard<'_> {
    fn drop(&mut self) {
        // The owned guard keeps its own Arc; release it before counting
        self.guard.take();
        self.locks
            .remove_if(&self.code, |_, lock| Arc::strong_count(lock) == 1);
    }
}
