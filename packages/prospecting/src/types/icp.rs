//! Targeting definitions: the legacy ICP and the richer strategy profile.

use serde::{Deserialize, Serialize};

/// Numeric budget bounds attached to an ICP.
///
/// Part of the stored contract; scoring does not read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

/// Simple targeting definition (target industries and titles).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderIcp {
    /// Whether the user has configured targeting at all.
    pub is_set: bool,
    pub industries: Vec<String>,
    pub titles: Vec<String>,
    pub budget_range: BudgetRange,
}

impl ProviderIcp {
    /// A configured ICP with the given industries and titles.
    pub fn new(
        industries: impl IntoIterator<Item = impl Into<String>>,
        titles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            is_set: true,
            industries: industries.into_iter().map(Into::into).collect(),
            titles: titles.into_iter().map(Into::into).collect(),
            budget_range: BudgetRange::default(),
        }
    }

    /// The "targeting not configured" ICP.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn with_budget_range(mut self, min: f64, max: f64) -> Self {
        self.budget_range = BudgetRange { min, max };
        self
    }
}

/// An industry entry in a strategy profile.
///
/// Profiles saved by older clients hold plain strings; newer ones may store
/// tagged objects (`{"label": .., "value": ..}`). Only plain strings feed
/// the text-relevance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndustryEntry {
    Name(String),
    Tagged(serde_json::Value),
}

impl IndustryEntry {
    /// The plain-string form, if this entry is one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            IndustryEntry::Name(name) => Some(name),
            IndustryEntry::Tagged(_) => None,
        }
    }
}

impl From<&str> for IndustryEntry {
    fn from(name: &str) -> Self {
        IndustryEntry::Name(name.to_string())
    }
}

impl From<String> for IndustryEntry {
    fn from(name: String) -> Self {
        IndustryEntry::Name(name)
    }
}

/// Structured ICP signals inside a strategy profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredIcp {
    /// Title fragments that identify a buyer ("CEO", "Head of").
    pub decision_makers: Vec<String>,

    /// Headcount tokens the provider sells best into.
    pub company_size_ideal: Vec<String>,

    /// Problem phrases a good-fit company would describe.
    pub pain_points: Vec<String>,
}

/// Richer, optional targeting definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderStrategyProfile {
    pub target_audience: Option<String>,
    pub value_proposition: Option<String>,
    pub industries: Vec<IndustryEntry>,
    pub icp_structured: Option<StructuredIcp>,
}

impl ProviderStrategyProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    pub fn with_value_proposition(mut self, proposition: impl Into<String>) -> Self {
        self.value_proposition = Some(proposition.into());
        self
    }

    pub fn with_industries(
        mut self,
        industries: impl IntoIterator<Item = impl Into<IndustryEntry>>,
    ) -> Self {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_structured(mut self, structured: StructuredIcp) -> Self {
        self.icp_structured = Some(structured);
        self
    }

    /// Lowercased text the contact's title and industry are matched against.
    ///
    /// Concatenates audience, value proposition and plain-string industries
    /// with single spaces. Empty when none of them carry text.
    pub fn target_text(&self) -> String {
        let parts: Vec<&str> = self
            .target_audience
            .as_deref()
            .into_iter()
            .chain(self.value_proposition.as_deref())
            .chain(self.industries.iter().filter_map(IndustryEntry::as_name))
            .filter(|p| !p.trim().is_empty())
            .collect();
        parts.join(" ").to_lowercase()
    }
}

impl StructuredIcp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decision_makers(
        mut self,
        titles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.decision_makers = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_company_sizes(mut self, sizes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.company_size_ideal = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pain_points(mut self, points: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.pain_points = points.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icp_uses_camel_case_keys() {
        let icp: ProviderIcp = serde_json::from_str(
            r#"{"isSet": true, "industries": ["SaaS"], "titles": [], "budgetRange": {"min": 0, "max": 5000}}"#,
        )
        .unwrap();
        assert!(icp.is_set);
        assert_eq!(icp.industries, vec!["SaaS".to_string()]);
        assert_eq!(icp.budget_range.max, 5000.0);
    }

    #[test]
    fn test_missing_icp_fields_default_to_unset() {
        let icp: ProviderIcp = serde_json::from_str("{}").unwrap();
        assert_eq!(icp, ProviderIcp::unset());
    }

    #[test]
    fn test_profile_accepts_mixed_industries() {
        let profile: ProviderStrategyProfile = serde_json::from_str(
            r#"{
                "target_audience": "Logistics Firms",
                "industries": ["Retail", {"label": "Fintech", "value": "fintech"}],
                "icp_structured": {"decision_makers": ["CEO"]}
            }"#,
        )
        .unwrap();

        assert_eq!(profile.industries.len(), 2);
        assert_eq!(profile.industries[0].as_name(), Some("Retail"));
        assert_eq!(profile.industries[1].as_name(), None);
        assert_eq!(
            profile.icp_structured.unwrap().decision_makers,
            vec!["CEO".to_string()]
        );
    }

    #[test]
    fn test_target_text_skips_tagged_and_blank_parts() {
        let profile = ProviderStrategyProfile::new()
            .with_target_audience("Logistics Firms")
            .with_value_proposition("  ")
            .with_industries(vec![
                IndustryEntry::from("Retail"),
                IndustryEntry::Tagged(serde_json::json!({"label": "Fintech"})),
            ]);

        assert_eq!(profile.target_text(), "logistics firms retail");
        assert_eq!(ProviderStrategyProfile::new().target_text(), "");
    }
}
