//! JSON-file storage implementation.
//!
//! Everything lives in one JSON document whose top-level keys mirror the
//! browser local-storage layout the data was originally kept in, so an
//! exported local-storage dump can be loaded directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::traits::store::{ContactStore, SettingsStore};
use crate::types::{
    contact::{Contact, ContactId},
    icp::{ProviderIcp, ProviderStrategyProfile},
    integration::IntegrationProvider,
};

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Document {
    contacts: Vec<Contact>,
    provider_icp: ProviderIcp,
    provider_strategy_profile: Option<ProviderStrategyProfile>,
    integrations: Vec<IntegrationProvider>,
}

/// File-backed store.
///
/// Every operation reads the document from disk and writes it back whole.
/// Writes go to a temporary sibling file that is then renamed over the
/// original, so a crash never leaves a half-written document. Operations
/// on one `FileStore` are serialized; separate processes sharing the file
/// are not coordinated.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. The flag is set when contacts saved without an
    /// id were given one and the document should be written back.
    async fn read(&self) -> StoreResult<(Document, bool)> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Document::default(), false))
            }
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok((Document::default(), false));
        }

        let mut raw: serde_json::Value = serde_json::from_slice(&bytes)?;
        let assigned = assign_missing_ids(&mut raw);
        if assigned > 0 {
            debug!(path = %self.path.display(), assigned, "Assigned ids to stored contacts");
        }
        Ok((serde_json::from_value(raw)?, assigned > 0))
    }

    async fn write(&self, document: &Document) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read, modify and write the document under the store lock.
    async fn update<T>(&self, f: impl FnOnce(&mut Document) -> T) -> StoreResult<T> {
        let _guard = self.lock.lock().await;
        let (mut document, _) = self.read().await?;
        let out = f(&mut document);
        self.write(&document).await?;
        Ok(out)
    }

    /// Read the document, persisting any ids assigned while reading so a
    /// contact keeps the same id across calls.
    async fn snapshot(&self) -> StoreResult<Document> {
        let _guard = self.lock.lock().await;
        let (document, assigned) = self.read().await?;
        if assigned {
            self.write(&document).await?;
        }
        Ok(document)
    }
}

/// Give every contact object without a usable `id` a fresh one.
fn assign_missing_ids(raw: &mut serde_json::Value) -> usize {
    let Some(contacts) = raw.get_mut("contacts").and_then(|c| c.as_array_mut()) else {
        return 0;
    };
    let mut assigned = 0;
    for contact in contacts.iter_mut().filter_map(|c| c.as_object_mut()) {
        let has_id = contact
            .get("id")
            .and_then(|id| id.as_str())
            .is_some_and(|id| !id.trim().is_empty());
        if !has_id {
            contact.insert("id".into(), Uuid::now_v7().to_string().into());
            assigned += 1;
        }
    }
    assigned
}

fn upsert(contacts: &mut Vec<Contact>, contact: &Contact) {
    match contacts.iter_mut().find(|c| c.id == contact.id) {
        Some(existing) => *existing = contact.clone(),
        None => contacts.push(contact.clone()),
    }
}

#[async_trait]
impl ContactStore for FileStore {
    async fn get_contact(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        let document = self.snapshot().await?;
        Ok(document.contacts.into_iter().find(|c| c.id == id))
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.snapshot().await?.contacts)
    }

    async fn upsert_contact(&self, contact: &Contact) -> StoreResult<()> {
        self.update(|doc| upsert(&mut doc.contacts, contact)).await
    }

    async fn upsert_contacts(&self, contacts: &[Contact]) -> StoreResult<()> {
        self.update(|doc| {
            for contact in contacts {
                upsert(&mut doc.contacts, contact);
            }
        })
        .await
    }

    async fn delete_contact(&self, id: ContactId) -> StoreResult<bool> {
        self.update(|doc| {
            let before = doc.contacts.len();
            doc.contacts.retain(|c| c.id != id);
            doc.contacts.len() != before
        })
        .await
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn load_icp(&self) -> StoreResult<ProviderIcp> {
        Ok(self.snapshot().await?.provider_icp)
    }

    async fn save_icp(&self, icp: &ProviderIcp) -> StoreResult<()> {
        self.update(|doc| doc.provider_icp = icp.clone()).await
    }

    async fn load_profile(&self) -> StoreResult<Option<ProviderStrategyProfile>> {
        Ok(self.snapshot().await?.provider_strategy_profile)
    }

    async fn save_profile(&self, profile: Option<&ProviderStrategyProfile>) -> StoreResult<()> {
        self.update(|doc| doc.provider_strategy_profile = profile.cloned())
            .await
    }

    async fn load_integrations(&self) -> StoreResult<Vec<IntegrationProvider>> {
        Ok(self.snapshot().await?.integrations)
    }

    async fn save_integrations(&self, integrations: &[IntegrationProvider]) -> StoreResult<()> {
        self.update(|doc| doc.integrations = integrations.to_vec())
            .await
    }
}
