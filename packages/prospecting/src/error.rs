//! Typed errors for the prospecting library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Note that neither scoring nor the waterfall resolver surface errors to
//! callers: provider failures are absorbed as misses and "no provider
//! configured" is a [`DiscoveryResult`](crate::DiscoveryResult) variant.
//! The types here cover the provider clients and the storage layer.

use thiserror::Error;

/// Top-level error for prospecting operations.
#[derive(Debug, Error)]
pub enum ProspectingError {
    /// A data provider call failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by a single data-provider lookup.
///
/// Every variant is recoverable from the waterfall's point of view: the
/// resolver logs it and moves on to the next provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, TLS, connection reset, body decode)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered with an unexpected status
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// Credentials rejected by the provider
    #[error("{provider} rejected the API key")]
    Unauthorized { provider: String },

    /// Provider quota exhausted
    #[error("{provider} rate limit exceeded")]
    RateLimited { provider: String },

    /// Lookup exceeded its time budget
    #[error("lookup timed out")]
    Timeout,

    /// Provider answered with something we could not interpret
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Contact lacks a field the provider needs to run a lookup
    #[error("contact is missing {field}")]
    MissingInput { field: &'static str },

    /// No client is registered for this integration id
    #[error("no finder registered for integration '{provider_id}'")]
    Unsupported { provider_id: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProviderError::Timeout;
        }
        if err.is_decode() {
            return ProviderError::MalformedResponse(err.to_string());
        }
        ProviderError::Http(Box::new(err))
    }
}

/// Errors raised by contact and settings stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database backend failed
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Referenced record does not exist
    #[error("contact {id} not found")]
    NotFound { id: uuid::Uuid },
}

/// Result type alias for prospecting operations.
pub type Result<T> = std::result::Result<T, ProspectingError>;

/// Result type alias for provider lookups.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
