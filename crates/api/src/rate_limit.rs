// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-window rate limiting for the public filing endpoint.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Returned when a caller exceeds their filing allowance for the window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Rate limit exceeded: retry in {retry_after_seconds} seconds")]
pub struct RateLimitExceeded {
    /// Seconds until the current window resets.
    pub retry_after_seconds: u64,
}

/// Per-key counter state for one window.
struct WindowCounter {
    window_start: Instant,
    count: u32,
}

/// A fixed-window rate limiter keyed by actor identity.
///
/// Counters live in this process only: with more than one server instance,
/// each instance counts separately and the effective allowance multiplies.
/// Multi-instance deployments need a counter in the shared store instead.
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    counters: Mutex<HashMap<String, WindowCounter>>,
}

impl FixedWindowLimiter {
    /// Default filing allowance: 5 filings per 60-second window.
    pub const DEFAULT_MAX_REQUESTS: u32 = 5;
    /// Default window length.
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

    /// Creates a limiter with the given window and per-window allowance.
    #[must_use]
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request for `key` and rejects it when the allowance for
    /// the current window is already spent.
    ///
    /// # Arguments
    ///
    /// * `key` - The actor identity being limited
    ///
    /// # Errors
    ///
    /// Returns `RateLimitExceeded` with the seconds remaining in the window.
    pub fn check(&self, key: &str) -> Result<(), RateLimitExceeded> {
        let now: Instant = Instant::now();
        let mut counters = self
            .counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Drop counters whose window has long passed so the map stays
        // bounded by the set of recently active actors.
        counters.retain(|_, counter| now.duration_since(counter.window_start) < self.window * 2);

        let counter = counters.entry(key.to_string()).or_insert(WindowCounter {
            window_start: now,
            count: 0,
        });

        if now.duration_since(counter.window_start) >= self.window {
            counter.window_start = now;
            counter.count = 0;
        }

        if counter.count >= self.max_requests {
            let elapsed: Duration = now.duration_since(counter.window_start);
            let remaining: Duration = self.window.saturating_sub(elapsed);
            return Err(RateLimitExceeded {
                retry_after_seconds: remaining.as_secs().max(1),
            });
        }

        counter.count += 1;
        Ok(())
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW, Self::DEFAULT_MAX_REQUESTS)
    }
}
