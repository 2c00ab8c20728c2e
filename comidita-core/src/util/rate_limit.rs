use std::{collections::HashMap, time::Duration};

use parking_lot::{Mutex, MutexGuard};

use crate::entities::TimestampMs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub allowed: bool,
    pub remaining: u32,
}

#[derive(Debug)]
struct RateLimitEntry {
    count: u32,
    reset_at: TimestampMs,
}

/// Counts requests per identifier within fixed time windows.
///
/// A window starts with the first request of an identifier and
/// is reset by the first request after it has elapsed.
#[derive(Debug, Default)]
pub struct RateLimiter(Mutex<HashMap<String, RateLimitEntry>>);

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, identifier: &str, max_requests: u32, window: Duration) -> RateLimitStatus {
        self.check_at(identifier, max_requests, window, TimestampMs::now())
    }

    pub fn check_at(
        &self,
        identifier: &str,
        max_requests: u32,
        window: Duration,
        now: TimestampMs,
    ) -> RateLimitStatus {
        let mut entries = self.lock();
        match entries.get_mut(identifier) {
            Some(entry) if now <= entry.reset_at => {
                if entry.count < max_requests {
                    entry.count += 1;
                    RateLimitStatus {
                        allowed: true,
                        remaining: max_requests - entry.count,
                    }
                } else {
                    RateLimitStatus {
                        allowed: false,
                        remaining: 0,
                    }
                }
            }
            _ => {
                let reset_at = now.checked_add(window).unwrap_or(now);
                entries.insert(
                    identifier.to_owned(),
                    RateLimitEntry { count: 1, reset_at },
                );
                RateLimitStatus {
                    allowed: true,
                    remaining: max_requests.saturating_sub(1),
                }
            }
        }
    }

    /// Forgets all identifiers whose window has elapsed.
    pub fn sweep_at(&self, now: TimestampMs) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    pub fn sweep(&self) -> usize {
        self.sweep_at(TimestampMs::now())
    }

    fn lock(&self) -> MutexGuard<HashMap<String, RateLimitEntry>> {
        self.0.lock()
    }
}
