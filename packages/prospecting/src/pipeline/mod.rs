//! Caller-layer operations built on the scorer and the resolver.
//!
//! The pipeline orchestrates:
//! - Qualification (score one contact, or rescan all of them)
//! - Enrichment (bulk waterfall discovery for contacts without an email)
//! - Write-back of discovered emails and lead-source trails
//! - Store-backed variants that load settings and persist results

pub mod enrich;
pub mod qualify;

pub use enrich::{apply_discovery, discover_missing_emails, enrich_contacts};
pub use qualify::{
    qualify_contact, qualify_contacts, rescore_all, rescore_contact, QualificationSummary,
};
