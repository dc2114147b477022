//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::store::{ContactStore, SettingsStore};
use crate::types::{
    contact::{Contact, ContactId},
    icp::{ProviderIcp, ProviderStrategyProfile},
    integration::IntegrationProvider,
};

/// In-memory storage for contacts and settings.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
pub struct MemoryStore {
    contacts: RwLock<IndexMap<ContactId, Contact>>,
    icp: RwLock<ProviderIcp>,
    profile: RwLock<Option<ProviderStrategyProfile>>,
    integrations: RwLock<Vec<IntegrationProvider>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            contacts: RwLock::new(IndexMap::new()),
            icp: RwLock::new(ProviderIcp::unset()),
            profile: RwLock::new(None),
            integrations: RwLock::new(Vec::new()),
        }
    }

    /// Seed the store with contacts.
    pub fn with_contacts(self, contacts: impl IntoIterator<Item = Contact>) -> Self {
        {
            let mut stored = self.contacts.write().unwrap();
            for contact in contacts {
                stored.insert(contact.id, contact);
            }
        }
        self
    }

    pub fn with_icp(self, icp: ProviderIcp) -> Self {
        *self.icp.write().unwrap() = icp;
        self
    }

    pub fn with_profile(self, profile: ProviderStrategyProfile) -> Self {
        *self.profile.write().unwrap() = Some(profile);
        self
    }

    pub fn with_integrations(self, integrations: Vec<IntegrationProvider>) -> Self {
        *self.integrations.write().unwrap() = integrations;
        self
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.contacts.write().unwrap().clear();
        *self.icp.write().unwrap() = ProviderIcp::unset();
        *self.profile.write().unwrap() = None;
        self.integrations.write().unwrap().clear();
    }

    /// Get the number of stored contacts.
    pub fn contact_count(&self) -> usize {
        self.contacts.read().unwrap().len()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn get_contact(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        Ok(self.contacts.read().unwrap().get(&id).cloned())
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.contacts.read().unwrap().values().cloned().collect())
    }

    async fn upsert_contact(&self, contact: &Contact) -> StoreResult<()> {
        self.contacts
            .write()
            .unwrap()
            .insert(contact.id, contact.clone());
        Ok(())
    }

    async fn delete_contact(&self, id: ContactId) -> StoreResult<bool> {
        Ok(self.contacts.write().unwrap().shift_remove(&id).is_some())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load_icp(&self) -> StoreResult<ProviderIcp> {
        Ok(self.icp.read().unwrap().clone())
    }

    async fn save_icp(&self, icp: &ProviderIcp) -> StoreResult<()> {
        *self.icp.write().unwrap() = icp.clone();
        Ok(())
    }

    async fn load_profile(&self) -> StoreResult<Option<ProviderStrategyProfile>> {
        Ok(self.profile.read().unwrap().clone())
    }

    async fn save_profile(&self, profile: Option<&ProviderStrategyProfile>) -> StoreResult<()> {
        *self.profile.write().unwrap() = profile.cloned();
        Ok(())
    }

    async fn load_integrations(&self) -> StoreResult<Vec<IntegrationProvider>> {
        Ok(self.integrations.read().unwrap().clone())
    }

    async fn save_integrations(&self, integrations: &[IntegrationProvider]) -> StoreResult<()> {
        *self.integrations.write().unwrap() = integrations.to_vec();
        Ok(())
    }
}
