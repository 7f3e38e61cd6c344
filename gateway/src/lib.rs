//! REST gateway for Roster.
//!
//! # Architecture
//!
//! One [`ResourceClient`] per record variant wraps the five backend
//! operations (list, fetch, create, update, delete). Every operation
//! resolves to an [`Envelope`] - transport failures, non-success statuses,
//! and malformed bodies are all normalized into `succeeded = false` with a
//! diagnostic message. Nothing past this boundary ever sees a raised
//! transport fault.
//!
//! # Wire contract
//!
//! | Verb | Path | Body | Payload |
//! |------|------|------|---------|
//! | GET | `/{resource}` | - | ordered record list (bare or key-wrapped) |
//! | GET | `/{resource}/{id}` | - | single record |
//! | POST | `/{resource}` | draft JSON | created record |
//! | PUT | `/{resource}/{id}` | draft JSON | updated record |
//! | DELETE | `/{resource}/{id}` | - | none (empty body on success) |
//!
//! Responses arrive as `{ "success": bool, "message": string, "data": ...,
//! "errors": ... }`; list `data` is accepted in two documented shapes (a
//! bare array, or an object wrapping the array under a key) and normalized
//! in [`envelope`] before anything downstream sees it.
//!
//! # Retries
//!
//! Idempotent GETs go through [`retry`] (exponential backoff with
//! down-jitter, `Retry-After` respected). Mutations are sent exactly once:
//! the reconciler serializes them and recovers from failures by reloading,
//! so a blind retry could double-apply a create.

mod client;
mod envelope;
pub mod retry;

use std::sync::OnceLock;
use std::time::Duration;

pub use client::ResourceClient;
pub use envelope::Envelope;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const POOL_MAX_IDLE_PER_HOST: usize = 4;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Shared HTTP client for all resource clients.
///
/// Built once; connection pooling and timeouts apply process-wide. Plain
/// HTTP is allowed because the default backend is a loopback address.
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build tuned HTTP client: {e}. Using defaults.");
                reqwest::Client::new()
            })
    })
}

/// Validated backend base URL, e.g. `http://127.0.0.1:8000/api`.
///
/// Trailing slashes are stripped so path joining is uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

#[derive(Debug, thiserror::Error)]
pub enum BaseUrlError {
    #[error("base URL is empty")]
    Empty,
    #[error("base URL {0:?} must start with http:// or https://")]
    MissingScheme(String),
}

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, BaseUrlError> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(BaseUrlError::Empty);
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(BaseUrlError::MissingScheme(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn join(&self, segment: &str) -> String {
        format!("{}/{segment}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_strips_trailing_slashes() {
        let url = BaseUrl::parse("http://127.0.0.1:8000/api//").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api");
        assert_eq!(url.join("events"), "http://127.0.0.1:8000/api/events");
    }

    #[test]
    fn base_url_rejects_empty_and_schemeless() {
        assert!(matches!(BaseUrl::parse("  "), Err(BaseUrlError::Empty)));
        assert!(matches!(
            BaseUrl::parse("127.0.0.1:8000/api"),
            Err(BaseUrlError::MissingScheme(_))
        ));
    }
}
