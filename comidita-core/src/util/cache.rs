use std::{collections::HashMap, time::Duration};

use parking_lot::{Mutex, MutexGuard};

use crate::entities::TimestampMs;

pub const TTL_SHORT: Duration = Duration::from_secs(5 * 60);
pub const TTL_MEDIUM: Duration = Duration::from_secs(30 * 60);
pub const TTL_LONG: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct CacheEntry<T> {
    payload: T,
    stored_at: TimestampMs,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_expired_at(&self, now: TimestampMs) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

/// In-memory response cache with a time-to-live per entry.
///
/// Expired entries are removed lazily when read and
/// periodically by calling [`ResponseCache::sweep`].
/// There is no size limit.
#[derive(Debug)]
pub struct ResponseCache<T>(Mutex<HashMap<String, CacheEntry<T>>>);

impl<T> Default for ResponseCache<T> {
    fn default() -> Self {
        Self(Mutex::new(HashMap::new()))
    }
}

impl<T: Clone> ResponseCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, TimestampMs::now())
    }

    pub fn get_at(&self, key: &str, now: TimestampMs) -> Option<T> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: impl Into<String>, payload: T, ttl: Duration) {
        self.set_at(key, payload, ttl, TimestampMs::now());
    }

    pub fn set_at(&self, key: impl Into<String>, payload: T, ttl: Duration, now: TimestampMs) {
        let entry = CacheEntry {
            payload,
            stored_at: now,
            ttl,
        };
        self.lock().insert(key.into(), entry);
    }

    /// Removes all expired entries and returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(TimestampMs::now())
    }

    pub fn sweep_at(&self, now: TimestampMs) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<HashMap<String, CacheEntry<T>>> {
        self.0.lock()
    }
}
