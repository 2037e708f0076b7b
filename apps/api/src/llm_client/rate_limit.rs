//! Request pacing for the generation backend.
//!
//! The structured client awaits a `RateLimiter` before every backend attempt, so the pacing
//! policy can be tuned (or disabled in tests) without touching generation logic.

use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Suspends until one more request may be sent.
    async fn acquire(&self);
}

/// Token bucket: `requests_per_minute` sustained, up to `burst` back-to-back requests.
pub struct TokenBucket {
    limiter: DefaultDirectRateLimiter,
}

impl TokenBucket {
    pub fn per_minute(requests_per_minute: u32, burst: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst.max(1)).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: DefaultDirectRateLimiter::direct(Quota::per_minute(rate).allow_burst(burst)),
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucket {
    async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

/// No pacing at all.
pub struct Unthrottled;

#[async_trait]
impl RateLimiter for Unthrottled {
    async fn acquire(&self) {}
}
