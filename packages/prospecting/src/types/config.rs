//! Configuration types for discovery runs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a single waterfall run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Time budget for each provider call.
    ///
    /// A provider that does not answer in time counts as a miss and the
    /// waterfall moves on. Default: 15 seconds.
    pub provider_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(15),
        }
    }
}

impl DiscoveryConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-provider timeout.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }
}

/// Configuration for bulk "find all missing emails" runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDiscoveryConfig {
    /// Contacts resolved at the same time.
    ///
    /// Each contact's own waterfall stays sequential; this only bounds how
    /// many contacts are in flight. Values below 1 are treated as 1.
    /// Default: 4.
    pub concurrency: usize,
}

impl Default for BulkDiscoveryConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

impl BulkDiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub(crate) fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            DiscoveryConfig::default().provider_timeout,
            Duration::from_secs(15)
        );
        assert_eq!(BulkDiscoveryConfig::default().concurrency, 4);
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let config = BulkDiscoveryConfig::new().with_concurrency(0);
        assert_eq!(config.effective_concurrency(), 1);
    }
}
