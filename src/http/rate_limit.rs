//! Client-side quota guard
//!
//! Uses the governor crate for a fixed token bucket. The quota is set once
//! from configuration and never adjusted from response headers.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Published third-party quota of the card API
pub const PROVIDER_REQUESTS_PER_HOUR: u32 = 5000;

/// Configuration for the quota guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per hour
    pub requests_per_hour: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::provider_quota()
    }
}

impl RateLimiterConfig {
    /// Create a new quota guard config
    pub fn new(requests_per_hour: u32, burst_size: u32) -> Self {
        Self {
            requests_per_hour,
            burst_size,
        }
    }

    /// The provider's published hourly quota, with a small burst allowance
    pub fn provider_quota() -> Self {
        Self {
            requests_per_hour: PROVIDER_REQUESTS_PER_HOUR,
            burst_size: 10,
        }
    }
}

/// Token bucket quota guard
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new quota guard with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let quota = Quota::per_hour(
            NonZeroU32::new(config.requests_per_hour).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    /// Wait with a timeout
    pub async fn wait_with_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.limiter.until_ready())
            .await
            .is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}
