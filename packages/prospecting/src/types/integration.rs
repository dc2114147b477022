//! Configured third-party data providers.

use serde::{Deserialize, Serialize};

use crate::security::SecretString;

/// A configured third-party data source (Hunter, Apollo, ...).
///
/// The ordered collection of these is owned by the caller and persisted by
/// a [`SettingsStore`](crate::SettingsStore). The resolver only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationProvider {
    /// Stable key that selects the finder implementation (e.g. `"hunter"`).
    pub id: String,

    /// Human-readable name, reported as the discovery source.
    pub name: String,

    #[serde(default)]
    pub api_key: SecretString,

    #[serde(default)]
    pub enabled: bool,

    /// Lower values are tried first.
    #[serde(default)]
    pub priority: i32,

    /// Informational cost per successful match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_match: Option<f64>,
}

impl IntegrationProvider {
    /// A disabled provider with no credential.
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            api_key: SecretString::empty(),
            enabled: false,
            priority,
            cost_per_match: None,
        }
    }

    /// Set the credential and enable the provider.
    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = api_key.into();
        self.enabled = true;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_cost_per_match(mut self, cost: f64) -> Self {
        self.cost_per_match = Some(cost);
        self
    }

    /// Enabled and holding a non-empty credential.
    pub fn is_eligible(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

/// Eligible providers in the order the waterfall tries them.
///
/// Filters to [`IntegrationProvider::is_eligible`] entries and sorts them by
/// ascending priority. The sort is stable, so equal priorities keep the
/// order they were configured in.
pub fn waterfall_order(integrations: &[IntegrationProvider]) -> Vec<&IntegrationProvider> {
    let mut eligible: Vec<&IntegrationProvider> =
        integrations.iter().filter(|p| p.is_eligible()).collect();
    eligible.sort_by_key(|p| p.priority);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_requires_enabled_and_key() {
        let bare = IntegrationProvider::new("hunter", "Hunter", 1);
        assert!(!bare.is_eligible());

        let keyed = bare.clone().with_api_key("k");
        assert!(keyed.is_eligible());

        let disabled = keyed.clone().with_enabled(false);
        assert!(!disabled.is_eligible());

        let blank_key = IntegrationProvider::new("apollo", "Apollo", 2)
            .with_api_key("")
            .with_enabled(true);
        assert!(!blank_key.is_eligible());
    }

    #[test]
    fn test_waterfall_order_filters_and_sorts() {
        let integrations = vec![
            IntegrationProvider::new("c", "C", 3).with_api_key("k"),
            IntegrationProvider::new("off", "Off", 0),
            IntegrationProvider::new("a", "A", 1).with_api_key("k"),
            IntegrationProvider::new("b1", "B1", 2).with_api_key("k"),
            IntegrationProvider::new("b2", "B2", 2).with_api_key("k"),
        ];

        let ids: Vec<&str> = waterfall_order(&integrations)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn test_deserializes_local_storage_shape() {
        let provider: IntegrationProvider = serde_json::from_str(
            r#"{"id": "hunter", "name": "Hunter.io", "apiKey": "abc", "enabled": true, "priority": 1, "costPerMatch": 0.05}"#,
        )
        .unwrap();
        assert!(provider.is_eligible());
        assert_eq!(provider.api_key.expose(), "abc");
        assert_eq!(provider.cost_per_match, Some(0.05));
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = IntegrationProvider::new("hunter", "Hunter", 1).with_api_key("secret-key");
        assert!(!format!("{:?}", provider).contains("secret-key"));
    }
}
