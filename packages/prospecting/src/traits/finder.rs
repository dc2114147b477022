//! Provider-calling capability used by the waterfall resolver.
//!
//! A `ContactFinder` performs whatever vendor-specific lookup one
//! integration needs. The resolver owns ordering, timeouts and fallback;
//! finders only answer "do you have an email for this contact?".
//!
//! # Implementations
//!
//! - `HunterFinder` - Hunter.io email finder
//! - `ApolloFinder` - Apollo people match
//! - `FinderRegistry` - Dispatches to a finder by integration id
//! - `RateLimitedFinder` - Wraps any finder with a request quota
//! - `MockFinder` - Scripted responses for testing

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ProviderResult;
use crate::types::{contact::Contact, integration::IntegrationProvider};

/// Looks up a missing email for a contact through one provider.
#[async_trait]
pub trait ContactFinder: Send + Sync {
    /// Attempt a lookup.
    ///
    /// `Ok(None)` means the provider answered but has no email for this
    /// contact. Errors are treated as misses by the resolver, so
    /// implementations should not retry internally.
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>>;

    /// Short name for logging.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ContactFinder + ?Sized> ContactFinder for Arc<T> {
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>> {
        (**self).find_email(provider, contact).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
