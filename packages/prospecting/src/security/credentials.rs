//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of provider API keys.

use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A secret string that won't be logged or displayed.
///
/// Integration API keys live inside [`IntegrationProvider`](crate::IntegrationProvider)
/// records that are routinely logged and persisted. Wrapping them keeps the key
/// out of `Debug`/`Display` output while still letting settings stores
/// round-trip the value.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// An empty credential (integration not configured yet).
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// True when no credential has been entered.
    ///
    /// Whitespace-only keys count as empty.
    pub fn is_empty(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("[EMPTY]")
        } else {
            f.write_str("[REDACTED]")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Settings stores persist the raw key, so serialization exposes it.
impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::new(raw.unwrap_or_default()))
    }
}
