//! Per-document serialisation of read-modify-write cycles.
//!
//! Services hold the guard returned by [`DocumentLocks::lock`] while they
//! load, edit, and replace a document, so two concurrent likes on one post
//! cannot overwrite each other. Different documents never contend. Reads do
//! not take the lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by document id.
///
/// Entries are pruned once no task holds or awaits them.
#[derive(Debug)]
pub struct DocumentLocks<K> {
    slots: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> Default for DocumentLocks<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

/// Guard serialising mutations of one document; released on drop.
#[derive(Debug)]
pub struct DocumentGuard<'a, K: Eq + Hash + Clone> {
    key: K,
    locks: &'a DocumentLocks<K>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K: Eq + Hash + Clone> DocumentLocks<K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the document identified by `key`.
    pub async fn lock(&self, key: K) -> DocumentGuard<'_, K> {
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            Arc::clone(slots.entry(key.clone()).or_default())
        };
        let guard = slot.lock_owned().await;
        DocumentGuard {
            key,
            locks: self,
            guard: Some(guard),
        }
    }

    /// Number of documents currently tracked.
    pub fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn release(&self, key: &K) {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // The registry holds one reference; anything above that is a waiter.
        if slots
            .get(key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(key);
        }
    }
}

impl<K: Eq + Hash + Clone> Drop for DocumentGuard<'_, K> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn guards_on_same_key_are_exclusive() {
        let locks = Arc::new(DocumentLocks::<u32>::new());
        let counter = Arc::new(AsyncMutex::new(Vec::new()));

        let first = locks.lock(1).await;
        let task = {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            tokio::spawn(async move {
                let _guard = locks.lock(1).await;
                counter.lock().await.push("second");
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        counter.lock().await.push("first");
        drop(first);
        task.await.expect("task completes");

        assert_eq!(*counter.lock().await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let locks = DocumentLocks::<u32>::new();
        let _a = locks.lock(1).await;
        let _b = tokio::time::timeout(Duration::from_millis(100), locks.lock(2))
            .await
            .expect("independent key acquired");
        assert_eq!(locks.tracked(), 2);
    }

    #[tokio::test]
    async fn idle_entries_are_pruned() {
        let locks = DocumentLocks::<u32>::new();
        drop(locks.lock(7).await);
        assert_eq!(locks.tracked(), 0);
    }
}
