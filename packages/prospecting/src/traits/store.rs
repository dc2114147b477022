//! Storage traits for contacts and targeting settings.
//!
//! The storage layer is split into focused traits:
//! - `ContactStore`: lead records
//! - `SettingsStore`: ICP, strategy profile and the integration list
//! - `ProspectStore`: Composite trait combining both

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{
    contact::{Contact, ContactId},
    icp::{ProviderIcp, ProviderStrategyProfile},
    integration::IntegrationProvider,
};

/// Store for lead records.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Get a contact by id.
    async fn get_contact(&self, id: ContactId) -> StoreResult<Option<Contact>>;

    /// All contacts, in insertion order.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// Insert or replace a contact.
    async fn upsert_contact(&self, contact: &Contact) -> StoreResult<()>;

    /// Insert or replace several contacts.
    async fn upsert_contacts(&self, contacts: &[Contact]) -> StoreResult<()> {
        for contact in contacts {
            self.upsert_contact(contact).await?;
        }
        Ok(())
    }

    /// Delete a contact. Returns whether it existed.
    async fn delete_contact(&self, id: ContactId) -> StoreResult<bool>;
}

/// Store for targeting configuration and provider integrations.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The ICP, or [`ProviderIcp::unset`] if none was saved.
    async fn load_icp(&self) -> StoreResult<ProviderIcp>;

    async fn save_icp(&self, icp: &ProviderIcp) -> StoreResult<()>;

    /// The strategy profile, if one was saved.
    async fn load_profile(&self) -> StoreResult<Option<ProviderStrategyProfile>>;

    async fn save_profile(&self, profile: Option<&ProviderStrategyProfile>) -> StoreResult<()>;

    /// Integrations in their configured order.
    async fn load_integrations(&self) -> StoreResult<Vec<IntegrationProvider>>;

    async fn save_integrations(&self, integrations: &[IntegrationProvider]) -> StoreResult<()>;
}

/// Composite store used by the store-backed pipeline operations.
pub trait ProspectStore: ContactStore + SettingsStore {}

impl<T: ContactStore + SettingsStore> ProspectStore for T {}
