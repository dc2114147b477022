use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::traits::finder::ContactFinder;
use crate::types::{
    config::DiscoveryConfig,
    contact::Contact,
    discovery::{AttemptOutcome, DiscoveryReport, DiscoveryResult, ProviderAttempt},
    integration::{waterfall_order, IntegrationProvider},
};

/// Resolves missing emails by walking providers in priority order.
///
/// The resolver holds no per-run state: the integration list is passed to
/// every call and only read. One resolver can serve many contacts
/// concurrently; within a single contact the waterfall is sequential.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = WaterfallResolver::new(FinderRegistry::with_defaults()?)
///     .with_config(DiscoveryConfig::new().with_provider_timeout(Duration::from_secs(10)));
///
/// match resolver.discover_email(&contact, &integrations).await {
///     DiscoveryResult::Found { email, source } => println!("{} via {}", email, source),
///     DiscoveryResult::NotFound => println!("no provider had this contact"),
///     DiscoveryResult::Error => println!("enable at least one integration"),
/// }
/// ```
pub struct WaterfallResolver<F: ContactFinder> {
    finder: F,
    config: DiscoveryConfig,
}

impl<F: ContactFinder> WaterfallResolver<F> {
    pub fn new(finder: F) -> Self {
        Self {
            finder,
            config: DiscoveryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Find an email for the contact.
    pub async fn discover_email(
        &self,
        contact: &Contact,
        integrations: &[IntegrationProvider],
    ) -> DiscoveryResult {
        self.discover(contact, integrations).await.result
    }

    /// Find an email and report every provider attempt.
    pub async fn discover(
        &self,
        contact: &Contact,
        integrations: &[IntegrationProvider],
    ) -> DiscoveryReport {
        let queue = waterfall_order(integrations);
        if queue.is_empty() {
            warn!(
                contact = %contact.id,
                configured = integrations.len(),
                "No enabled integration with an API key; skipping discovery"
            );
            return DiscoveryReport::new(DiscoveryResult::Error, Vec::new());
        }

        let mut attempts = Vec::with_capacity(queue.len());

        for provider in queue {
            let started = Instant::now();
            let (outcome, email) = self.attempt(provider, contact).await;
            attempts.push(ProviderAttempt {
                provider_id: provider.id.clone(),
                provider_name: provider.name.clone(),
                outcome,
                elapsed_ms: elapsed_ms(started.elapsed()),
            });

            if let Some(email) = email {
                info!(
                    contact = %contact.id,
                    provider = %provider.id,
                    attempts = attempts.len(),
                    "Email discovered"
                );
                return DiscoveryReport::new(
                    DiscoveryResult::Found {
                        email,
                        source: provider.name.clone(),
                    },
                    attempts,
                );
            }
        }

        debug!(
            contact = %contact.id,
            attempts = attempts.len(),
            "All providers exhausted without an email"
        );
        DiscoveryReport::new(DiscoveryResult::NotFound, attempts)
    }

    /// Consult one provider. Never fails: errors and timeouts become outcomes.
    async fn attempt(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> (AttemptOutcome, Option<String>) {
        debug!(contact = %contact.id, provider = %provider.id, priority = provider.priority, "Trying provider");

        let call = self.finder.find_email(provider, contact);
        match tokio::time::timeout(self.config.provider_timeout, call).await {
            Ok(Ok(Some(email))) if !email.trim().is_empty() => {
                (AttemptOutcome::Found, Some(email.trim().to_string()))
            }
            Ok(Ok(_)) => {
                debug!(contact = %contact.id, provider = %provider.id, "Provider had no email");
                (AttemptOutcome::Miss, None)
            }
            Ok(Err(e)) => {
                warn!(
                    contact = %contact.id,
                    provider = %provider.id,
                    error = %e,
                    "Provider lookup failed; trying next provider"
                );
                (
                    AttemptOutcome::Failed {
                        reason: e.to_string(),
                    },
                    None,
                )
            }
            Err(_) => {
                warn!(
                    contact = %contact.id,
                    provider = %provider.id,
                    timeout_ms = elapsed_ms(self.config.provider_timeout),
                    "Provider lookup timed out; trying next provider"
                );
                (AttemptOutcome::TimedOut, None)
            }
        }
    }
}

fn elapsed_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
