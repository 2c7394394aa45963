// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyed mutex for per-resource exclusive access
//!
//! Operations sharing a key (an SDDC id) run their critical sections one at a
//! time, in arrival order. Operations on different keys never wait on each
//! other. Per-key locks are created lazily and live as long as the registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-key exclusive locks
///
/// Share one registry between all operations that must be serialized, usually
/// through an `Arc<KeyedMutex>`.
#[derive(Debug, Default)]
pub struct KeyedMutex {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the lock for `key`.
    ///
    /// The registry lock is held across the lookup and the insert, so two
    /// callers racing on a new key always end up with the same lock.
    fn entry(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Acquire the lock for `key`, waiting until the current holder releases it.
    ///
    /// The returned guard releases the lock when dropped.
    pub async fn lock(&self, key: &str) -> KeyGuard {
        let lock = self.entry(key);

        let guard = match lock.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::debug!(key, "lock held, waiting");
                let start = Instant::now();
                let guard = lock.lock_owned().await;
                tracing::debug!(
                    key,
                    waited_ms = start.elapsed().as_millis() as u64,
                    "lock acquired after wait"
                );
                guard
            }
        };

        tracing::trace!(key, "lock acquired");
        KeyGuard::new(key, guard)
    }

    /// Acquire the lock for `key` only if nobody holds it.
    pub fn try_lock(&self, key: &str) -> Option<KeyGuard> {
        let guard = self.entry(key).try_lock_owned().ok()?;
        tracing::trace!(key, "lock acquired");
        Some(KeyGuard::new(key, guard))
    }

    /// Check whether `key` is currently held
    pub fn is_locked(&self, key: &str) -> bool {
        let locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        match locks.get(key) {
            Some(lock) => lock.try_lock().is_err(),
            None => false,
        }
    }

    /// Number of keys ever locked through this registry
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Release capability for one acquisition of a [`KeyedMutex`] key
///
/// Dropping the guard releases the key. Because release is tied to drop it
/// happens exactly once on every exit path, including cancellation.
#[must_use = "the key is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct KeyGuard {
    key: String,
    acquired_at: Instant,
    _guard: OwnedMutexGuard<()>,
}

impl KeyGuard {
    fn new(key: &str, guard: OwnedMutexGuard<()>) -> Self {
        Self {
            key: key.to_string(),
            acquired_at: Instant::now(),
            _guard: guard,
        }
    }

    /// The key this guard holds
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        tracing::debug!(
            key = %self.key,
            held_ms = self.acquired_at.elapsed().as_millis() as u64,
            "lock released"
        );
    }
}

#[cfg(test)]
#[path = "keyed_mutex_tests.rs"]
mod tests;
