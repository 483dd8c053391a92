//! Key-sharded lock table for per-cart-line mutual exclusion.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use paddock_core::{ProductId, UserKey};

/// Number of lock shards. Power of two so the hash maps with a mask.
const DEFAULT_SHARDS: usize = 128;

/// A fixed table of mutexes sharded by `(user_key, product_id)` hash.
///
/// Holding the guard for a key excludes every other read-modify-write
/// cycle for that key. Two distinct keys may hash to the same shard and
/// serialize against each other; that costs some parallelism but never
/// correctness. Lock grants are queue-ordered by the runtime, not by
/// request arrival.
#[derive(Debug)]
pub struct KeyLockTable {
    shards: Vec<Arc<Mutex<()>>>,
}

impl KeyLockTable {
    /// Create a lock table with the default shard count.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Create a lock table with `shards` mutexes, rounded up to a power of
    /// two.
    #[must_use]
    pub fn with_shards(shards: usize) -> Self {
        let count = shards.max(1).next_power_of_two();
        Self {
            shards: (0..count).map(|_| Arc::new(Mutex::new(()))).collect(),
        }
    }

    /// Acquire the exclusive lock for a `(user_key, product_id)` pair,
    /// waiting until it is free.
    pub async fn lock(&self, user_key: &UserKey, product_id: ProductId) -> OwnedMutexGuard<()> {
        let mut hasher = DefaultHasher::new();
        user_key.hash(&mut hasher);
        product_id.hash(&mut hasher);
        let index = (hasher.finish() as usize) & (self.shards.len() - 1);

        // index is masked with len - 1 and the table is never empty
        #[allow(clippy::indexing_slicing)]
        let shard = Arc::clone(&self.shards[index]);
        shard.lock_owned().await
    }
}

impl Default for KeyLockTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_same_key_is_mutually_exclusive() {
        let table = Arc::new(KeyLockTable::with_shards(4));
        let counter = Arc::new(AtomicI32::new(0));
        let key = UserKey::parse("a@b.c").unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let table = Arc::clone(&table);
            let counter = Arc::clone(&counter);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                let _guard = table.lock(&key, ProductId::new(1)).await;
                // Unsynchronized read-modify-write; only safe under the lock.
                let current = counter.load(Ordering::Relaxed);
                tokio::task::yield_now().await;
                counter.store(current + 1, Ordering::Relaxed);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(counter.load(Ordering::Relaxed), 50);
    }

    #[test]
    fn test_shard_count_rounds_to_power_of_two() {
        let table = KeyLockTable::with_shards(100);
        assert_eq!(table.shards.len(), 128);
        let table = KeyLockTable::with_shards(0);
        assert_eq!(table.shards.len(), 1);
    }
}
