//! Rate-limited finder wrapper.
//!
//! Wraps any ContactFinder implementation with rate limiting using the
//! governor crate.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::ProviderResult;
use crate::traits::finder::ContactFinder;
use crate::types::{contact::Contact, integration::IntegrationProvider};

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A finder wrapper that enforces a request quota.
///
/// The quota is shared by every clone, so one wrapper placed in front of a
/// registry limits all provider calls of a bulk run together.
#[derive(Clone)]
pub struct RateLimitedFinder<F: ContactFinder> {
    inner: F,
    limiter: Arc<DefaultRateLimiter>,
}

impl<F: ContactFinder> RateLimitedFinder<F> {
    /// Create a rate-limited finder. A rate of zero is treated as one.
    pub fn new(finder: F, requests_per_second: u32) -> Self {
        Self::with_quota(finder, Quota::per_second(non_zero(requests_per_second)))
    }

    /// Create with burst support.
    pub fn with_burst(finder: F, requests_per_second: u32, burst: u32) -> Self {
        let quota = Quota::per_second(non_zero(requests_per_second)).allow_burst(non_zero(burst));
        Self::with_quota(finder, quota)
    }

    /// Create with a custom quota.
    pub fn with_quota(finder: F, quota: Quota) -> Self {
        Self {
            inner: finder,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

#[async_trait]
impl<F: ContactFinder> ContactFinder for RateLimitedFinder<F> {
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>> {
        self.limiter.until_ready().await;
        self.inner.find_email(provider, contact).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{integration, MockFinder};
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_passes_through() {
        let mock = MockFinder::new().with_email("hunter", "a@b.co");
        let finder = RateLimitedFinder::new(mock.clone(), 100);

        let found = finder
            .find_email(&integration("hunter", 1), &Contact::new())
            .await
            .unwrap();

        assert_eq!(found.as_deref(), Some("a@b.co"));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(finder.name(), "mock");
    }

    #[tokio::test]
    async fn test_throttles_beyond_burst() {
        let finder = RateLimitedFinder::with_burst(MockFinder::new(), 10, 1);
        let provider = integration("hunter", 1);
        let contact = Contact::new();

        let start = Instant::now();
        for _ in 0..3 {
            finder.find_email(&provider, &contact).await.unwrap();
        }

        // One immediate permit, then two more at 100ms intervals.
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        assert_eq!(non_zero(0).get(), 1);
        assert_eq!(non_zero(5).get(), 5);
    }
}
