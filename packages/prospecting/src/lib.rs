//! Lead Qualification & Contact Discovery Library
//!
//! Decides how well a lead matches a provider's Ideal Customer Profile and
//! fills in missing emails by asking third-party data providers one at a
//! time, in the order the user configured them.
//!
//! # Design Philosophy
//!
//! - Scoring is a pure function: same contact and targeting, same score
//! - Providers are a capability passed in, never a global
//! - Provider failures are misses, not errors
//! - Library handles mechanics, app handles persistence and presentation
//!
//! # Usage
//!
//! ```rust,ignore
//! use prospecting::{FinderRegistry, MemoryStore, WaterfallResolver};
//! use prospecting::pipeline::{enrich_contacts, rescore_all};
//!
//! let store = MemoryStore::new();
//! let resolver = WaterfallResolver::new(FinderRegistry::with_defaults()?);
//!
//! // Score everything against the saved ICP
//! let summary = rescore_all(&store).await?;
//!
//! // Fill in missing emails, then persist and rescore the finds
//! let report = enrich_contacts(&store, &resolver, &Default::default(), &cancel).await?;
//! ```
//!
//! # Modules
//!
//! - [`scoring`] - ICP fit scoring
//! - [`discovery`] - Waterfall contact discovery
//! - [`pipeline`] - Rescans, bulk enrichment and write-back
//! - [`finders`] - Provider clients (Hunter, Apollo) and wrappers
//! - [`stores`] - Storage implementations (MemoryStore, FileStore, SqliteStore)
//! - [`traits`] - Provider and storage abstractions
//! - [`types`] - Contacts, targeting and results
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod discovery;
pub mod error;
pub mod finders;
pub mod pipeline;
pub mod scoring;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ProspectingError, ProviderError, StoreError};
pub use security::SecretString;
pub use traits::{
    finder::ContactFinder,
    store::{ContactStore, ProspectStore, SettingsStore},
};
pub use types::{
    config::{BulkDiscoveryConfig, DiscoveryConfig},
    contact::{Contact, ContactId, IcpStatus},
    discovery::{
        AttemptOutcome, BulkDiscoveryReport, ContactDiscovery, DiscoveryReport, DiscoveryResult,
        ProviderAttempt,
    },
    icp::{BudgetRange, IndustryEntry, ProviderIcp, ProviderStrategyProfile, StructuredIcp},
    integration::{waterfall_order, IntegrationProvider},
    score::{FitScore, ScoreSignal},
};

pub use discovery::WaterfallResolver;
pub use scoring::{score, SCORING_RULES_VERSION};

// Re-export pipeline components
pub use pipeline::{
    apply_discovery, discover_missing_emails, enrich_contacts, qualify_contact, qualify_contacts,
    rescore_all, rescore_contact, QualificationSummary,
};

// Re-export finders
pub use finders::{ApolloFinder, FinderRegistry, HunterFinder, RateLimitedFinder};

// Re-export stores
pub use stores::{FileStore, MemoryStore};

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

// Re-export testing utilities
pub use testing::{MockFinder, MockResponse};
