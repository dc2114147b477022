//! Lead records and their qualification status.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Identifier of a lead record.
pub type ContactId = Uuid;

/// Separator used when appending to a contact's lead-source trail.
pub const LEAD_SOURCE_SEPARATOR: &str = " + ";

/// A person/company lead record.
///
/// Every descriptive field is optional. Scoring treats an absent or blank
/// field as "no contribution" rather than an error, so partially imported
/// rows (CSV, scraped profiles) can be scored as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Records saved without an id get a fresh one when they are read.
    #[serde(default = "Uuid::now_v7")]
    pub id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,

    /// Job title, e.g. "Chief Technology Officer".
    pub title: Option<String>,

    /// Free-text description of the role.
    pub title_description: Option<String>,

    /// Primary industry descriptor (often Arabic in imported data).
    pub industry_ar: Option<String>,

    /// Secondary industry descriptor (often English).
    pub industry_2: Option<String>,

    pub company_description: Option<String>,

    /// Headcount token such as `"50-200"` or `"1-10"`.
    pub employee_count: Option<String>,

    pub annual_revenue: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub website: Option<String>,

    /// Attribution trail of the sources that contributed data.
    pub lead_source: Option<String>,

    /// Last computed fit score (written back by the caller).
    pub fit_score: Option<u32>,

    /// Last computed qualification status (written back by the caller).
    pub icp_status: Option<IcpStatus>,
}

impl Contact {
    /// Create an empty contact with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_title_description(mut self, description: impl Into<String>) -> Self {
        self.title_description = Some(description.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry_ar = Some(industry.into());
        self
    }

    pub fn with_secondary_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry_2 = Some(industry.into());
        self
    }

    pub fn with_company_description(mut self, description: impl Into<String>) -> Self {
        self.company_description = Some(description.into());
        self
    }

    pub fn with_employee_count(mut self, count: impl Into<String>) -> Self {
        self.employee_count = Some(count.into());
        self
    }

    pub fn with_annual_revenue(mut self, revenue: impl Into<String>) -> Self {
        self.annual_revenue = Some(revenue.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_linkedin_url(mut self, url: impl Into<String>) -> Self {
        self.linkedin_url = Some(url.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_lead_source(mut self, source: impl Into<String>) -> Self {
        self.lead_source = Some(source.into());
        self
    }

    /// True if the contact already carries a usable email address.
    pub fn has_email(&self) -> bool {
        non_blank(self.email.as_deref()).is_some()
    }

    /// Display name for logs ("Jane Doe", falling back to the company or id).
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        if !parts.is_empty() {
            return parts.join(" ");
        }
        non_blank(self.company_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Registrable host of the contact's website, without a leading `www.`.
    ///
    /// Accepts bare domains (`acme.io`) as well as full URLs.
    pub fn company_domain(&self) -> Option<String> {
        let raw = non_blank(self.website.as_deref())?;
        let parsed = if raw.contains("://") {
            Url::parse(raw).ok()?
        } else {
            Url::parse(&format!("https://{}", raw)).ok()?
        };
        let host = parsed.host_str()?.to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }

    /// Append a source to the lead-source trail.
    ///
    /// The trail reads `"old + new"`. Appending a source that is already on
    /// the trail is a no-op.
    pub fn append_lead_source(&mut self, source: &str) {
        let source = source.trim();
        if source.is_empty() {
            return;
        }
        match non_blank(self.lead_source.as_deref()) {
            None => self.lead_source = Some(source.to_string()),
            Some(existing) => {
                let already_listed = existing
                    .split(LEAD_SOURCE_SEPARATOR)
                    .any(|s| s.trim().eq_ignore_ascii_case(source));
                if !already_listed {
                    self.lead_source =
                        Some(format!("{}{}{}", existing, LEAD_SOURCE_SEPARATOR, source));
                }
            }
        }
    }
}

/// Tri-state qualification status derived from a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IcpStatus {
    /// Score of 70 or more.
    Verified,
    /// Between the two thresholds, or nothing to score against.
    Pending,
    /// Score below 30.
    Failed,
}

impl IcpStatus {
    /// Minimum score that qualifies a contact.
    pub const VERIFIED_THRESHOLD: u32 = 70;

    /// Scores strictly below this fail qualification.
    pub const FAILED_THRESHOLD: u32 = 30;

    /// Derive the status for a summed score.
    pub fn from_score(score: u32) -> Self {
        if score >= Self::VERIFIED_THRESHOLD {
            IcpStatus::Verified
        } else if score < Self::FAILED_THRESHOLD {
            IcpStatus::Failed
        } else {
            IcpStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IcpStatus::Verified => "verified",
            IcpStatus::Pending => "pending",
            IcpStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for IcpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IcpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(IcpStatus::Verified),
            "pending" => Ok(IcpStatus::Pending),
            "failed" => Ok(IcpStatus::Failed),
            other => Err(format!("invalid ICP status: {}", other)),
        }
    }
}

/// Returns the value if it holds anything other than whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert_eq!(IcpStatus::from_score(70), IcpStatus::Verified);
        assert_eq!(IcpStatus::from_score(69), IcpStatus::Pending);
        assert_eq!(IcpStatus::from_score(30), IcpStatus::Pending);
        assert_eq!(IcpStatus::from_score(29), IcpStatus::Failed);
        assert_eq!(IcpStatus::from_score(0), IcpStatus::Failed);
        assert_eq!(IcpStatus::from_score(170), IcpStatus::Verified);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&IcpStatus::Verified).unwrap();
        assert_eq!(json, "\"verified\"");
        assert_eq!("failed".parse::<IcpStatus>().unwrap(), IcpStatus::Failed);
        assert!("unknown".parse::<IcpStatus>().is_err());
    }

    #[test]
    fn test_has_email_ignores_blank() {
        assert!(!Contact::new().has_email());
        assert!(!Contact::new().with_email("  ").has_email());
        assert!(Contact::new().with_email("a@b.co").has_email());
    }

    #[test]
    fn test_company_domain_variants() {
        let bare = Contact::new().with_website("acme.io");
        assert_eq!(bare.company_domain().as_deref(), Some("acme.io"));

        let full = Contact::new().with_website("https://www.Acme.io/about?x=1");
        assert_eq!(full.company_domain().as_deref(), Some("acme.io"));

        assert_eq!(Contact::new().company_domain(), None);
        assert_eq!(Contact::new().with_website("   ").company_domain(), None);
    }

    #[test]
    fn test_append_lead_source_builds_trail() {
        let mut contact = Contact::new();
        contact.append_lead_source("CSV Import");
        assert_eq!(contact.lead_source.as_deref(), Some("CSV Import"));

        contact.append_lead_source("Hunter");
        assert_eq!(contact.lead_source.as_deref(), Some("CSV Import + Hunter"));

        contact.append_lead_source("hunter");
        assert_eq!(contact.lead_source.as_deref(), Some("CSV Import + Hunter"));

        contact.append_lead_source("  ");
        assert_eq!(contact.lead_source.as_deref(), Some("CSV Import + Hunter"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let named = Contact::new().with_name("Jane", "Doe");
        assert_eq!(named.display_name(), "Jane Doe");

        let company = Contact::new().with_company_name("Acme");
        assert_eq!(company.display_name(), "Acme");

        let anonymous = Contact::new();
        assert_eq!(anonymous.display_name(), anonymous.id.to_string());
    }

    #[test]
    fn test_deserializes_sparse_records() {
        let contact: Contact = serde_json::from_str(r#"{"title": "CTO"}"#).unwrap();
        assert_eq!(contact.title.as_deref(), Some("CTO"));
        assert!(contact.email.is_none());
        assert!(contact.icp_status.is_none());
    }

    #[test]
    fn test_sparse_records_get_distinct_ids() {
        let contacts: Vec<Contact> =
            serde_json::from_str(r#"[{"first_name": "Jane"}, {"first_name": "Omar"}]"#).unwrap();

        assert!(!contacts[0].id.is_nil());
        assert!(!contacts[1].id.is_nil());
        assert_ne!(contacts[0].id, contacts[1].id);
    }
}
