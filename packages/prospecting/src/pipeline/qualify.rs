//! Writing fit scores back onto contacts.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::scoring::score;
use crate::traits::store::ProspectStore;
use crate::types::{
    contact::{Contact, ContactId, IcpStatus},
    icp::{ProviderIcp, ProviderStrategyProfile},
    score::FitScore,
};

/// Per-status counts of a rescan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationSummary {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub failed: usize,
}

impl QualificationSummary {
    pub fn record(&mut self, status: IcpStatus) {
        self.total += 1;
        match status {
            IcpStatus::Verified => self.verified += 1,
            IcpStatus::Pending => self.pending += 1,
            IcpStatus::Failed => self.failed += 1,
        }
    }
}

/// Score a contact and store the result on it.
///
/// Any previous `fit_score`/`icp_status` is overwritten; it never feeds
/// into the new score.
pub fn qualify_contact(
    contact: &mut Contact,
    icp: &ProviderIcp,
    profile: Option<&ProviderStrategyProfile>,
) -> FitScore {
    let fit = score(contact, icp, profile);
    debug!(
        contact = %contact.id,
        score = fit.score,
        raw_score = fit.raw_score,
        status = %fit.status,
        "Contact scored"
    );
    contact.fit_score = Some(fit.score);
    contact.icp_status = Some(fit.status);
    fit
}

/// Rescore every contact in place.
pub fn qualify_contacts(
    contacts: &mut [Contact],
    icp: &ProviderIcp,
    profile: Option<&ProviderStrategyProfile>,
) -> QualificationSummary {
    let mut summary = QualificationSummary::default();
    for contact in contacts.iter_mut() {
        let fit = qualify_contact(contact, icp, profile);
        summary.record(fit.status);
    }
    summary
}

/// Rescore every stored contact against the stored targeting settings.
pub async fn rescore_all<S: ProspectStore + ?Sized>(store: &S) -> Result<QualificationSummary> {
    let icp = store.load_icp().await?;
    let profile = store.load_profile().await?;
    let mut contacts = store.list_contacts().await?;

    let summary = qualify_contacts(&mut contacts, &icp, profile.as_ref());
    store.upsert_contacts(&contacts).await?;

    info!(
        total = summary.total,
        verified = summary.verified,
        pending = summary.pending,
        failed = summary.failed,
        "Rescan complete"
    );
    Ok(summary)
}

/// Rescore one stored contact.
pub async fn rescore_contact<S: ProspectStore + ?Sized>(
    store: &S,
    id: ContactId,
) -> Result<FitScore> {
    let mut contact = store
        .get_contact(id)
        .await?
        .ok_or(StoreError::NotFound { id })?;
    let icp = store.load_icp().await?;
    let profile = store.load_profile().await?;

    let fit = qualify_contact(&mut contact, &icp, profile.as_ref());
    store.upsert_contact(&contact).await?;
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProspectingError;
    use crate::stores::MemoryStore;
    use crate::testing::{qualified_contact, tech_icp};
    use crate::traits::store::ContactStore;

    #[test]
    fn test_qualify_overwrites_previous_score() {
        let mut contact = qualified_contact();
        contact.fit_score = Some(5);
        contact.icp_status = Some(IcpStatus::Failed);

        let fit = qualify_contact(&mut contact, &tech_icp(), None);

        assert_eq!(contact.fit_score, Some(fit.score));
        assert_eq!(contact.icp_status, Some(IcpStatus::Verified));

        // Scoring the written-back contact again gives the same answer.
        let again = qualify_contact(&mut contact, &tech_icp(), None);
        assert_eq!(again, fit);
    }

    #[test]
    fn test_qualify_contacts_counts_statuses() {
        let mut contacts = vec![
            qualified_contact(),
            Contact::new().with_title("Intern"),
            Contact::new().with_title("Barista").with_employee_count("1-10"),
        ];

        let summary = qualify_contacts(&mut contacts, &tech_icp(), None);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.verified, 1);
        assert_eq!(summary.failed, 2);
        assert!(contacts.iter().all(|c| c.icp_status.is_some()));
    }

    #[tokio::test]
    async fn test_rescore_all_persists() {
        let contact = qualified_contact();
        let store = MemoryStore::new()
            .with_icp(tech_icp())
            .with_contacts([contact.clone()]);

        let summary = rescore_all(&store).await.unwrap();

        assert_eq!(summary.verified, 1);
        let stored = store.get_contact(contact.id).await.unwrap().unwrap();
        assert_eq!(stored.icp_status, Some(IcpStatus::Verified));

        // Saved fields are enough to report the result without scoring again.
        let fresh = crate::scoring::score(&stored, &tech_icp(), None);
        assert_eq!(stored.fit_score, Some(fresh.score));
        assert_eq!(stored.icp_status, Some(fresh.status));
    }

    #[tokio::test]
    async fn test_rescore_missing_contact() {
        let store = MemoryStore::new();
        let err = rescore_contact(&store, uuid::Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProspectingError::Store(StoreError::NotFound { .. })
        ));
    }
}
