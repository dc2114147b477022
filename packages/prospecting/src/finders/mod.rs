//! Data-provider clients.
//!
//! Available finders:
//! - `HunterFinder` - Hunter.io email finder
//! - `ApolloFinder` - Apollo people match
//! - `FinderRegistry` - Dispatches to a finder by integration id
//! - `RateLimitedFinder` - Request quota around any finder

pub mod apollo;
pub mod hunter;
pub mod rate_limited;
pub mod registry;

pub use apollo::ApolloFinder;
pub use hunter::HunterFinder;
pub use rate_limited::RateLimitedFinder;
pub use registry::FinderRegistry;

use crate::error::{ProviderError, ProviderResult};

/// Default per-request timeout of the HTTP clients.
pub(crate) const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

/// Map a non-success HTTP status to a provider error.
pub(crate) fn status_error(provider: &str, status: u16, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::Unauthorized {
            provider: provider.to_string(),
        },
        429 => ProviderError::RateLimited {
            provider: provider.to_string(),
        },
        _ => ProviderError::Status {
            provider: provider.to_string(),
            status,
            body: truncate(body, 200),
        },
    }
}

/// Read the body of a response, turning non-2xx answers into errors.
pub(crate) async fn success_body(
    provider: &str,
    response: reqwest::Response,
) -> ProviderResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(status_error(provider, status.as_u16(), body));
    }
    Ok(body)
}

/// Keep error bodies short enough for a log line.
fn truncate(mut body: String, max_chars: usize) -> String {
    if let Some((idx, _)) = body.char_indices().nth(max_chars) {
        body.truncate(idx);
        body.push_str("...");
    }
    body
}

/// Treat empty strings from provider payloads as absent.
pub(crate) fn usable_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty() && e.contains('@'))
}
