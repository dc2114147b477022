//! SQLite storage implementation.
//!
//! A file-based storage backend using SQLite. Good for:
//! - Local development
//! - Single-operator deployments
//! - Testing with persistent data
//!
//! Contacts are stored as JSON payloads keyed by id; settings live in a
//! key/value table using the same keys as the JSON file store.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{ContactStore, SettingsStore};
use crate::types::{
    contact::{Contact, ContactId},
    icp::{ProviderIcp, ProviderStrategyProfile},
    integration::IntegrationProvider,
};

const ICP_KEY: &str = "provider_icp";
const PROFILE_KEY: &str = "provider_strategy_profile";
const INTEGRATIONS_KEY: &str = "integrations";

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(Box::new(e))
}

/// SQLite-based contact and settings store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://prospects.db?mode=rwc` - Create if not exists
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        Self::connect(database_url, 5).await
    }

    /// Create an in-memory SQLite store (for testing).
    ///
    /// Uses a single connection: every pooled connection to `:memory:`
    /// would otherwise see its own empty database.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(db_err)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_setting<T: serde::de::DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let row = sqlx::query_as::<_, SettingRow>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        match row {
            Some(r) => Ok(Some(serde_json::from_str(&r.value)?)),
            None => Ok(None),
        }
    }

    async fn save_setting<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let value = serde_json::to_string(value)?;
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(&value)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

// Row types for sqlx queries
#[derive(Debug, FromRow)]
struct ContactRow {
    payload: String,
}

impl ContactRow {
    fn into_contact(self) -> StoreResult<Contact> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

#[derive(Debug, FromRow)]
struct SettingRow {
    value: String,
}

#[async_trait]
impl ContactStore for SqliteStore {
    async fn get_contact(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>("SELECT payload FROM contacts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(ContactRow::into_contact).transpose()
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>("SELECT payload FROM contacts ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(ContactRow::into_contact).collect()
    }

    async fn upsert_contact(&self, contact: &Contact) -> StoreResult<()> {
        let payload = serde_json::to_string(contact)?;

        sqlx::query(
            r#"
            INSERT INTO contacts (id, payload, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(contact.id.to_string())
        .bind(&payload)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn delete_contact(&self, id: ContactId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SettingsStore for SqliteStore {
    async fn load_icp(&self) -> StoreResult<ProviderIcp> {
        Ok(self.load_setting(ICP_KEY).await?.unwrap_or_default())
    }

    async fn save_icp(&self, icp: &ProviderIcp) -> StoreResult<()> {
        self.save_setting(ICP_KEY, icp).await
    }

    async fn load_profile(&self) -> StoreResult<Option<ProviderStrategyProfile>> {
        Ok(self
            .load_setting::<Option<ProviderStrategyProfile>>(PROFILE_KEY)
            .await?
            .flatten())
    }

    async fn save_profile(&self, profile: Option<&ProviderStrategyProfile>) -> StoreResult<()> {
        self.save_setting(PROFILE_KEY, &profile).await
    }

    async fn load_integrations(&self) -> StoreResult<Vec<IntegrationProvider>> {
        Ok(self.load_setting(INTEGRATIONS_KEY).await?.unwrap_or_default())
    }

    async fn save_integrations(&self, integrations: &[IntegrationProvider]) -> StoreResult<()> {
        self.save_setting(INTEGRATIONS_KEY, integrations).await
    }
}
