//! Apollo people-match finder.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{success_body, usable_email, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::error::{ProviderError, ProviderResult};
use crate::traits::finder::ContactFinder;
use crate::types::{
    contact::{non_blank, Contact},
    integration::IntegrationProvider,
};

/// Default Apollo API base.
pub const APOLLO_API_BASE: &str = "https://api.apollo.io";

/// Apollo's stand-in for emails the account has not unlocked.
const LOCKED_EMAIL_MARKER: &str = "email_not_unlocked";

#[derive(Debug, Default, PartialEq, Serialize)]
pub(crate) struct ApolloMatchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_url: Option<&'a str>,
}

impl<'a> ApolloMatchRequest<'a> {
    /// Apollo can match on a LinkedIn URL alone, or on a name plus a company.
    pub(crate) fn from_contact(contact: &'a Contact) -> ProviderResult<Self> {
        let request = Self {
            first_name: non_blank(contact.first_name.as_deref()),
            last_name: non_blank(contact.last_name.as_deref()),
            organization_name: non_blank(contact.company_name.as_deref()),
            domain: contact.company_domain(),
            linkedin_url: non_blank(contact.linkedin_url.as_deref()),
        };

        let has_name = request.first_name.is_some() || request.last_name.is_some();
        let has_company = request.organization_name.is_some() || request.domain.is_some();
        if request.linkedin_url.is_none() && !(has_name && has_company) {
            return Err(ProviderError::MissingInput {
                field: "linkedin_url or name and company",
            });
        }
        Ok(request)
    }
}

#[derive(Debug, Deserialize)]
struct ApolloMatchResponse {
    person: Option<ApolloPerson>,
}

#[derive(Debug, Deserialize)]
struct ApolloPerson {
    email: Option<String>,
}

/// Client for Apollo's people-match endpoint.
pub struct ApolloFinder {
    client: reqwest::Client,
    base_url: String,
}

impl ApolloFinder {
    /// Create a client against the public API.
    pub fn new() -> ProviderResult<Self> {
        Self::with_base_url(APOLLO_API_BASE)
    }

    /// Create a client against another base URL (proxies, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/v1/people/match", self.base_url)
    }
}

/// Extract the email from a people-match response body.
pub(crate) fn parse_response(body: &str) -> ProviderResult<Option<String>> {
    let response: ApolloMatchResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
    let email = response.person.and_then(|p| usable_email(p.email));
    Ok(email.filter(|e| !e.starts_with(LOCKED_EMAIL_MARKER)))
}

#[async_trait]
impl ContactFinder for ApolloFinder {
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>> {
        let request = ApolloMatchRequest::from_contact(contact)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("X-Api-Key", provider.api_key.expose())
            .header("Cache-Control", "no-cache")
            .json(&request)
            .send()
            .await?;

        let body = success_body("apollo", response).await?;
        parse_response(&body)
    }

    fn name(&self) -> &str {
        "apollo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_known_fields_only() {
        let contact = Contact::new()
            .with_name("Jane", "Doe")
            .with_website("acme.io");

        let request = ApolloMatchRequest::from_contact(&contact).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"first_name": "Jane", "last_name": "Doe", "domain": "acme.io"})
        );
    }

    #[test]
    fn test_linkedin_alone_is_enough() {
        let contact = Contact::new().with_linkedin_url("https://linkedin.com/in/jane");
        assert!(ApolloMatchRequest::from_contact(&contact).is_ok());
    }

    #[test]
    fn test_name_without_company_is_rejected() {
        let contact = Contact::new().with_name("Jane", "Doe");
        assert!(matches!(
            ApolloMatchRequest::from_contact(&contact),
            Err(ProviderError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"person": {"id": "1", "email": "jane@acme.io"}}"#;
        assert_eq!(parse_response(body).unwrap().as_deref(), Some("jane@acme.io"));

        assert_eq!(parse_response(r#"{"person": null}"#).unwrap(), None);

        let locked = r#"{"person": {"email": "email_not_unlocked@domain.com"}}"#;
        assert_eq!(parse_response(locked).unwrap(), None);
    }
}
