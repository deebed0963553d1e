//! Access control utilities: user whitelist and per-user rate limiting.
//!
//! Both are small, independent, and in-memory; the transport layer calls
//! them before any extraction work starts.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// User whitelist. An empty list means open access.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    allowed: Vec<i64>,
}

impl Whitelist {
    pub fn new(allowed: Vec<i64>) -> Self {
        Self { allowed }
    }

    /// Whether the user may use the bot.
    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&user_id)
    }
}

/// Fixed-window per-user rate limiter.
///
/// Each user gets `max_requests` per window; the window restarts on the
/// first request after it elapses. A limit of zero disables limiting.
pub struct RateLimiter {
    windows: Mutex<HashMap<i64, (Instant, u32)>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Limiter with a one-minute window.
    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Register a request. Returns whether it stays under the window cap.
    pub fn check(&self, user_id: i64) -> bool {
        if self.max_requests == 0 {
            return true;
        }

        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let now = Instant::now();
        let entry = windows.entry(user_id).or_insert((now, 0));

        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }

        if entry.1 >= self.max_requests {
            return false;
        }
        entry.1 += 1;
        true
    }
}
