//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the prospecting
//! library without calling real data providers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::finder::ContactFinder;
use crate::types::{
    contact::{Contact, ContactId},
    icp::{ProviderIcp, ProviderStrategyProfile, StructuredIcp},
    integration::IntegrationProvider,
};

/// Scripted answer of a mock provider.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this email.
    Email(String),
    /// Answer without an email.
    Miss,
    /// Fail with a provider error.
    Fail(String),
    /// Sleep, then answer with the inner response.
    Delayed(Duration, Box<MockResponse>),
}

/// Record of a call made to the mock finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFinderCall {
    pub provider_id: String,
    pub contact_id: ContactId,
}

/// A mock finder with per-provider scripted responses.
///
/// Providers without a script answer with a miss. Clones share the script
/// and the call log, so a test can hand one clone to the resolver and
/// inspect the other.
#[derive(Clone, Default)]
pub struct MockFinder {
    /// Responses by integration id
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,

    /// Per-contact overrides, checked before `responses`
    contact_responses: Arc<RwLock<HashMap<(String, ContactId), MockResponse>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockFinderCall>>>,
}

impl MockFinder {
    /// Create a mock where every provider misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for a provider id.
    pub fn with_response(self, provider_id: impl Into<String>, response: MockResponse) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(provider_id.into(), response);
        self
    }

    /// Provider returns this email.
    pub fn with_email(self, provider_id: impl Into<String>, email: impl Into<String>) -> Self {
        self.with_response(provider_id, MockResponse::Email(email.into()))
    }

    /// Provider answers without an email.
    pub fn with_miss(self, provider_id: impl Into<String>) -> Self {
        self.with_response(provider_id, MockResponse::Miss)
    }

    /// Provider fails with an error.
    pub fn with_failure(self, provider_id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.with_response(provider_id, MockResponse::Fail(reason.into()))
    }

    /// Provider sleeps for `delay` before answering.
    pub fn with_delay(
        self,
        provider_id: impl Into<String>,
        delay: Duration,
        response: MockResponse,
    ) -> Self {
        self.with_response(provider_id, MockResponse::Delayed(delay, Box::new(response)))
    }

    /// Script a response for one provider and one contact only.
    pub fn with_contact_response(
        self,
        provider_id: impl Into<String>,
        contact_id: ContactId,
        response: MockResponse,
    ) -> Self {
        self.contact_responses
            .write()
            .unwrap()
            .insert((provider_id.into(), contact_id), response);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockFinderCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Provider ids in call order.
    pub fn called_provider_ids(&self) -> Vec<String> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .map(|c| c.provider_id.clone())
            .collect()
    }

    /// Calls made for one contact.
    pub fn calls_for(&self, contact_id: ContactId) -> Vec<MockFinderCall> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.contact_id == contact_id)
            .cloned()
            .collect()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn scripted(&self, provider_id: &str, contact_id: ContactId) -> MockResponse {
        let key = (provider_id.to_string(), contact_id);
        if let Some(response) = self.contact_responses.read().unwrap().get(&key) {
            return response.clone();
        }
        self.responses
            .read()
            .unwrap()
            .get(provider_id)
            .cloned()
            .unwrap_or(MockResponse::Miss)
    }
}

#[async_trait]
impl ContactFinder for MockFinder {
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>> {
        self.calls.write().unwrap().push(MockFinderCall {
            provider_id: provider.id.clone(),
            contact_id: contact.id,
        });

        let mut response = self.scripted(&provider.id, contact.id);
        loop {
            match response {
                MockResponse::Email(email) => return Ok(Some(email)),
                MockResponse::Miss => return Ok(None),
                MockResponse::Fail(reason) => {
                    return Err(ProviderError::Status {
                        provider: provider.id.clone(),
                        status: 500,
                        body: reason,
                    })
                }
                MockResponse::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    response = *inner;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// An enabled integration with a test key.
///
/// The display name is the id with its first letter uppercased
/// (`"hunter"` becomes `"Hunter"`).
pub fn integration(id: &str, priority: i32) -> IntegrationProvider {
    let mut chars = id.chars();
    let name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    IntegrationProvider::new(id, name, priority).with_api_key("test-key")
}

/// ICP targeting technology buyers.
pub fn tech_icp() -> ProviderIcp {
    ProviderIcp::new(["Technology", "تقنية"], ["CTO", "VP Engineering"])
}

/// Strategy profile with structured decision-maker and size signals.
pub fn tech_profile() -> ProviderStrategyProfile {
    ProviderStrategyProfile::new()
        .with_target_audience("Technology leaders at growing companies")
        .with_structured(
            StructuredIcp::new()
                .with_decision_makers(["CTO", "Chief"])
                .with_company_sizes(["50-200"])
                .with_pain_points(["Manual invoicing slows finance"]),
        )
}

/// A contact that qualifies strongly against [`tech_icp`].
pub fn qualified_contact() -> Contact {
    Contact::new()
        .with_name("Layla", "Haddad")
        .with_company_name("Rafeeq Tech")
        .with_title("CTO")
        .with_industry("تقنية")
        .with_employee_count("50-200")
        .with_website("https://www.rafeeq.tech")
        .with_linkedin_url("https://linkedin.com/in/layla")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_finder_scripts_and_records() {
        let finder = MockFinder::new()
            .with_email("hunter", "a@b.co")
            .with_failure("apollo", "boom");
        let contact = Contact::new();

        let found = finder
            .find_email(&integration("hunter", 1), &contact)
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("a@b.co"));

        assert!(finder
            .find_email(&integration("apollo", 2), &contact)
            .await
            .is_err());

        let unscripted = finder
            .find_email(&integration("other", 3), &contact)
            .await
            .unwrap();
        assert_eq!(unscripted, None);

        assert_eq!(finder.called_provider_ids(), vec!["hunter", "apollo", "other"]);
    }

    #[tokio::test]
    async fn test_contact_override_wins() {
        let special = Contact::new();
        let finder = MockFinder::new()
            .with_miss("hunter")
            .with_contact_response("hunter", special.id, MockResponse::Email("vip@b.co".into()));

        let hit = finder
            .find_email(&integration("hunter", 1), &special)
            .await
            .unwrap();
        let miss = finder
            .find_email(&integration("hunter", 1), &Contact::new())
            .await
            .unwrap();

        assert_eq!(hit.as_deref(), Some("vip@b.co"));
        assert_eq!(miss, None);
        assert_eq!(finder.calls_for(special.id).len(), 1);
    }

    #[test]
    fn test_integration_fixture_name() {
        let provider = integration("hunter", 1);
        assert_eq!(provider.name, "Hunter");
        assert!(provider.is_eligible());
    }
}
