//! Contact-discovery outcomes.

use serde::{Deserialize, Serialize};

use crate::types::contact::ContactId;

/// Outcome of one waterfall run for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiscoveryResult {
    /// A provider returned a usable email.
    Found { email: String, source: String },

    /// Every eligible provider was tried without success.
    NotFound,

    /// No enabled provider with a credential is configured.
    Error,
}

impl DiscoveryResult {
    pub fn is_found(&self) -> bool {
        matches!(self, DiscoveryResult::Found { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            DiscoveryResult::Found { email, .. } => Some(email),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            DiscoveryResult::Found { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// What happened when one provider was consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Found,
    /// Provider answered without an email.
    Miss,
    /// Provider call returned an error.
    Failed { reason: String },
    /// Provider did not answer within the per-call budget.
    TimedOut,
}

/// Record of a single provider call inside a waterfall run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttempt {
    pub provider_id: String,
    pub provider_name: String,
    pub outcome: AttemptOutcome,
    pub elapsed_ms: u64,
}

/// A waterfall result together with the attempts that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub result: DiscoveryResult,
    pub attempts: Vec<ProviderAttempt>,
}

impl DiscoveryReport {
    pub fn new(result: DiscoveryResult, attempts: Vec<ProviderAttempt>) -> Self {
        Self { result, attempts }
    }

    /// Provider ids in the order they were called.
    pub fn attempted_provider_ids(&self) -> Vec<&str> {
        self.attempts.iter().map(|a| a.provider_id.as_str()).collect()
    }
}

/// Per-contact entry of a bulk discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDiscovery {
    /// Index of the contact in the slice the run was given.
    pub position: usize,
    pub contact_id: ContactId,
    pub result: DiscoveryResult,
}

/// Summary of a bulk discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscoveryReport {
    pub results: Vec<ContactDiscovery>,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
    /// Contacts that already had an email.
    pub skipped: usize,
    /// Contacts never started because the run was cancelled.
    pub cancelled: usize,
}

impl BulkDiscoveryReport {
    pub(crate) fn record(&mut self, entry: ContactDiscovery) {
        match entry.result {
            DiscoveryResult::Found { .. } => self.found += 1,
            DiscoveryResult::NotFound => self.not_found += 1,
            DiscoveryResult::Error => self.errors += 1,
        }
        self.results.push(entry);
    }

    /// Result for the contact at `position` in the run's input.
    pub fn result_at(&self, position: usize) -> Option<&DiscoveryResult> {
        self.results
            .iter()
            .find(|r| r.position == position)
            .map(|r| &r.result)
    }

    /// Result for one contact, if it was resolved in this run. Prefer
    /// [`result_at`](Self::result_at) when ids may repeat in the input.
    pub fn result_for(&self, contact_id: ContactId) -> Option<&DiscoveryResult> {
        self.results
            .iter()
            .find(|r| r.contact_id == contact_id)
            .map(|r| &r.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_wire_shape() {
        let found = DiscoveryResult::Found {
            email: "jane@acme.io".into(),
            source: "Hunter".into(),
        };
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "found", "email": "jane@acme.io", "source": "Hunter"})
        );

        let json = serde_json::to_value(DiscoveryResult::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({"status": "not_found"}));

        let json = serde_json::to_value(DiscoveryResult::Error).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error"}));
    }

    #[test]
    fn test_bulk_report_counts() {
        let mut report = BulkDiscoveryReport::default();
        let id = uuid::Uuid::now_v7();
        report.record(ContactDiscovery {
            position: 0,
            contact_id: id,
            result: DiscoveryResult::Found {
                email: "a@b.co".into(),
                source: "Hunter".into(),
            },
        });
        report.record(ContactDiscovery {
            position: 2,
            contact_id: uuid::Uuid::now_v7(),
            result: DiscoveryResult::NotFound,
        });

        assert_eq!(report.found, 1);
        assert_eq!(report.not_found, 1);
        assert_eq!(report.errors, 0);
        assert_eq!(report.result_for(id).and_then(|r| r.email()), Some("a@b.co"));
        assert_eq!(report.result_at(2), Some(&DiscoveryResult::NotFound));
        assert!(report.result_at(1).is_none());
    }
}
