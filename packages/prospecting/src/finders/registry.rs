//! Dispatch from integration ids to provider clients.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

use super::{ApolloFinder, HunterFinder};
use crate::error::{ProviderError, ProviderResult};
use crate::traits::finder::ContactFinder;
use crate::types::{contact::Contact, integration::IntegrationProvider};

/// Routes each lookup to the finder registered for the integration's id.
///
/// Ids are matched case-insensitively. An integration whose id has no
/// registered finder fails with [`ProviderError::Unsupported`], which the
/// resolver treats like any other miss.
#[derive(Clone, Default)]
pub struct FinderRegistry {
    finders: IndexMap<String, Arc<dyn ContactFinder>>,
}

impl FinderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in Hunter and Apollo clients.
    pub fn with_defaults() -> ProviderResult<Self> {
        Ok(Self::new()
            .register("hunter", HunterFinder::new()?)
            .register("apollo", ApolloFinder::new()?))
    }

    /// Register (or replace) the finder for an integration id.
    pub fn register(mut self, provider_id: &str, finder: impl ContactFinder + 'static) -> Self {
        self.finders
            .insert(provider_id.to_lowercase(), Arc::new(finder));
        self
    }

    /// Register an already shared finder.
    pub fn register_shared(mut self, provider_id: &str, finder: Arc<dyn ContactFinder>) -> Self {
        self.finders.insert(provider_id.to_lowercase(), finder);
        self
    }

    pub fn get(&self, provider_id: &str) -> Option<&Arc<dyn ContactFinder>> {
        self.finders.get(&provider_id.to_lowercase())
    }

    pub fn supports(&self, provider_id: &str) -> bool {
        self.get(provider_id).is_some()
    }

    /// Registered ids in registration order.
    pub fn provider_ids(&self) -> impl Iterator<Item = &str> {
        self.finders.keys().map(String::as_str)
    }
}

#[async_trait]
impl ContactFinder for FinderRegistry {
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>> {
        let finder = self
            .get(&provider.id)
            .ok_or_else(|| ProviderError::Unsupported {
                provider_id: provider.id.clone(),
            })?;
        finder.find_email(provider, contact).await
    }

    fn name(&self) -> &str {
        "registry"
    }
}
