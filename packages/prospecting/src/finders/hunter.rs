//! Hunter.io email finder.
//!
//! Uses the `GET /v2/email-finder` endpoint, which needs the company domain
//! and the person's first and last name.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{success_body, usable_email, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::error::{ProviderError, ProviderResult};
use crate::traits::finder::ContactFinder;
use crate::types::{
    contact::{non_blank, Contact},
    integration::IntegrationProvider,
};

/// Default Hunter API base.
pub const HUNTER_API_BASE: &str = "https://api.hunter.io";

#[derive(Debug, Deserialize)]
struct HunterResponse {
    data: Option<HunterData>,
}

#[derive(Debug, Deserialize)]
struct HunterData {
    email: Option<String>,
    /// Hunter's confidence, 0-100.
    score: Option<u32>,
}

/// Query parameters of one email-finder lookup.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct HunterQuery {
    pub domain: String,
    pub first_name: String,
    pub last_name: String,
}

impl HunterQuery {
    pub(crate) fn from_contact(contact: &Contact) -> ProviderResult<Self> {
        let domain = contact
            .company_domain()
            .ok_or(ProviderError::MissingInput { field: "website" })?;
        let first_name = non_blank(contact.first_name.as_deref())
            .ok_or(ProviderError::MissingInput { field: "first_name" })?;
        let last_name = non_blank(contact.last_name.as_deref())
            .ok_or(ProviderError::MissingInput { field: "last_name" })?;
        Ok(Self {
            domain,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        })
    }
}

/// Client for Hunter's email finder.
pub struct HunterFinder {
    client: reqwest::Client,
    base_url: String,
}

impl HunterFinder {
    /// Create a client against the public API.
    pub fn new() -> ProviderResult<Self> {
        Self::with_base_url(HUNTER_API_BASE)
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
        format!("{}/v2/email-finder", self.base_url)
    }
}

/// Extract the email from an email-finder response body.
pub(crate) fn parse_response(body: &str) -> ProviderResult<Option<String>> {
    let response: HunterResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
    let Some(data) = response.data else {
        return Ok(None);
    };
    if let Some(score) = data.score {
        debug!(confidence = score, "Hunter match confidence");
    }
    Ok(usable_email(data.email))
}

#[async_trait]
impl ContactFinder for HunterFinder {
    async fn find_email(
        &self,
        provider: &IntegrationProvider,
        contact: &Contact,
    ) -> ProviderResult<Option<String>> {
        let query = HunterQuery::from_contact(contact)?;

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("domain", query.domain.as_str()),
                ("first_name", query.first_name.as_str()),
                ("last_name", query.last_name.as_str()),
                ("api_key", provider.api_key.expose()),
            ])
            .send()
            .await?;

        let body = success_body("hunter", response).await?;
        parse_response(&body)
    }

    fn name(&self) -> &str {
        "hunter"
    }
}
