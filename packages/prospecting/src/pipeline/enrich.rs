//! Bulk contact enrichment through the waterfall resolver.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::discovery::WaterfallResolver;
use crate::error::Result;
use crate::scoring::score;
use crate::traits::{finder::ContactFinder, store::ProspectStore};
use crate::types::{
    config::BulkDiscoveryConfig,
    contact::Contact,
    discovery::{BulkDiscoveryReport, ContactDiscovery, DiscoveryResult},
    integration::{waterfall_order, IntegrationProvider},
};

/// Write a discovery result onto a contact.
///
/// On `Found`, sets the email and appends the provider name to the
/// lead-source trail. Other results leave the contact untouched. Returns
/// whether the contact changed.
pub fn apply_discovery(contact: &mut Contact, result: &DiscoveryResult) -> bool {
    let DiscoveryResult::Found { email, source } = result else {
        return false;
    };
    contact.email = Some(email.clone());
    contact.append_lead_source(source);
    true
}

/// Run discovery for every contact that has no email yet.
///
/// The integration list is copied once up front, so edits made by the
/// caller while the run is in progress do not affect it. Up to
/// `config.concurrency` contacts are resolved at a time; each contact's
/// own waterfall stays sequential. Once `cancel` fires no new contact is
/// started, lookups already in flight run to completion, and the contacts
/// never started are counted as cancelled.
///
/// Per-contact results are reported in input order and carry the
/// contact's index in `contacts`.
pub async fn discover_missing_emails<F: ContactFinder>(
    resolver: &WaterfallResolver<F>,
    contacts: &[Contact],
    integrations: &[IntegrationProvider],
    config: &BulkDiscoveryConfig,
    cancel: &CancellationToken,
) -> BulkDiscoveryReport {
    let integrations = integrations.to_vec();
    let mut report = BulkDiscoveryReport::default();

    let pending: Vec<(usize, &Contact)> = contacts
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.has_email())
        .collect();
    report.skipped = contacts.len() - pending.len();

    if pending.is_empty() {
        debug!(skipped = report.skipped, "Every contact already has an email");
        return report;
    }
    if waterfall_order(&integrations).is_empty() {
        warn!(
            contacts = pending.len(),
            "No enabled integration with an API key; every lookup will fail"
        );
    }

    debug!(
        contacts = pending.len(),
        skipped = report.skipped,
        "Discovering emails (max {} concurrent)",
        config.effective_concurrency(),
    );

    let started = pending.len();
    let integrations = &integrations;
    let mut resolved: Vec<ContactDiscovery> = stream::iter(pending)
        .take_while(|_| futures::future::ready(!cancel.is_cancelled()))
        .map(|(idx, contact)| async move {
            let result = resolver.discover_email(contact, integrations).await;
            ContactDiscovery {
                position: idx,
                contact_id: contact.id,
                result,
            }
        })
        .buffer_unordered(config.effective_concurrency())
        .collect()
        .await;

    resolved.sort_by_key(|entry| entry.position);
    report.cancelled = started - resolved.len();
    for entry in resolved {
        report.record(entry);
    }

    if report.cancelled > 0 {
        warn!(
            cancelled = report.cancelled,
            completed = report.results.len(),
            "Discovery run cancelled"
        );
    }
    info!(
        found = report.found,
        not_found = report.not_found,
        errors = report.errors,
        skipped = report.skipped,
        cancelled = report.cancelled,
        "Discovery run complete"
    );
    report
}

/// Discover missing emails for every stored contact and persist the finds.
///
/// Uses the stored integration list. Each found email is written onto the
/// contact as it is stored when the run finishes, so edits made while the
/// lookups were running are kept. A contact that was deleted or gained an
/// email in the meantime is left alone. Contacts that gained an email are
/// rescored against the stored targeting settings before being saved.
pub async fn enrich_contacts<S, F>(
    store: &S,
    resolver: &WaterfallResolver<F>,
    config: &BulkDiscoveryConfig,
    cancel: &CancellationToken,
) -> Result<BulkDiscoveryReport>
where
    S: ProspectStore + ?Sized,
    F: ContactFinder,
{
    let contacts = store.list_contacts().await?;
    let integrations = store.load_integrations().await?;

    let report =
        discover_missing_emails(resolver, &contacts, &integrations, config, cancel).await;
    if report.found == 0 {
        return Ok(report);
    }

    let icp = store.load_icp().await?;
    let profile = store.load_profile().await?;

    let mut updated = Vec::with_capacity(report.found);
    for entry in report.results.iter().filter(|r| r.result.is_found()) {
        let id = contacts[entry.position].id;
        let Some(mut contact) = store.get_contact(id).await? else {
            debug!(contact_id = %id, "Contact removed during discovery");
            continue;
        };
        if contact.has_email() {
            debug!(contact_id = %id, "Contact gained an email during discovery");
            continue;
        }
        if apply_discovery(&mut contact, &entry.result) {
            let fit = score(&contact, &icp, profile.as_ref());
            contact.fit_score = Some(fit.score);
            contact.icp_status = Some(fit.status);
            updated.push(contact);
        }
    }

    store.upsert_contacts(&updated).await?;
    debug!(updated = updated.len(), "Enriched contacts saved");
    Ok(report)
}
