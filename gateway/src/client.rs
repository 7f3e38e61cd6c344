//! The per-resource REST client.

use std::marker::PhantomData;

use reqwest::header::ACCEPT;
use serde_json::Value;

use roster_types::Resource;

use crate::envelope::{Envelope, ListPayload, WireEnvelope, decode_value, normalize};
use crate::retry::{RetryConfig, RetryOutcome, send_with_retry};
use crate::{BaseUrl, http_client};

const JSON: &str = "application/json";

/// Longest slice of an error body quoted back in a failure message.
const MAX_ERROR_EXCERPT: usize = 200;

/// REST client for one record variant.
///
/// Cheap to clone (the underlying `reqwest::Client` is pooled and shared);
/// the engine clones one into each spawned request task.
#[derive(Debug)]
pub struct ResourceClient<R: Resource> {
    http: reqwest::Client,
    base: BaseUrl,
    retry: RetryConfig,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base: self.base.clone(),
            retry: self.retry.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    #[must_use]
    pub fn new(base: BaseUrl) -> Self {
        Self {
            http: http_client().clone(),
            base,
            retry: RetryConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Override the GET retry policy (tests use a no-delay config).
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn collection_url(&self) -> String {
        self.base.join(R::COLLECTION)
    }

    fn record_url(&self, id: &R::Id) -> String {
        format!("{}/{id}", self.collection_url())
    }

    /// `GET /{resource}` - the full ordered record list.
    pub async fn list(&self) -> Envelope<Vec<R>> {
        let url = self.collection_url();
        let outcome = send_with_retry(
            || self.http.get(&url).header(ACCEPT, JSON),
            &self.retry,
        )
        .await;
        let envelope = resolve(outcome, |data| {
            decode_value::<ListPayload<R>>(data)?.into_items(R::COLLECTION)
        })
        .await;
        warn_if_failed::<R, _>("list", &envelope);
        envelope
    }

    /// `GET /{resource}/{id}` - a single record.
    pub async fn fetch(&self, id: &R::Id) -> Envelope<R> {
        let url = self.record_url(id);
        let outcome = send_with_retry(
            || self.http.get(&url).header(ACCEPT, JSON),
            &self.retry,
        )
        .await;
        let envelope = resolve(outcome, decode_value).await;
        warn_if_failed::<R, _>("fetch", &envelope);
        envelope
    }

    /// `POST /{resource}` - create from a draft. Sent exactly once.
    pub async fn create(&self, draft: &R::Draft) -> Envelope<R> {
        let url = self.collection_url();
        let outcome = send_with_retry(
            || self.http.post(&url).header(ACCEPT, JSON).json(draft),
            &RetryConfig::none(),
        )
        .await;
        let envelope = resolve(outcome, decode_value).await;
        warn_if_failed::<R, _>("create", &envelope);
        envelope
    }

    /// `PUT /{resource}/{id}` - update from a draft. Sent exactly once.
    pub async fn update(&self, id: &R::Id, draft: &R::Draft) -> Envelope<R> {
        let url = self.record_url(id);
        let outcome = send_with_retry(
            || self.http.put(&url).header(ACCEPT, JSON).json(draft),
            &RetryConfig::none(),
        )
        .await;
        let envelope = resolve(outcome, decode_value).await;
        warn_if_failed::<R, _>("update", &envelope);
        envelope
    }

    /// `DELETE /{resource}/{id}`. Sent exactly once; an empty 2xx body is
    /// the expected success indicator.
    pub async fn delete(&self, id: &R::Id) -> Envelope<()> {
        let url = self.record_url(id);
        let outcome = send_with_retry(
            || self.http.delete(&url).header(ACCEPT, JSON),
            &RetryConfig::none(),
        )
        .await;
        let envelope = resolve_empty(outcome).await;
        warn_if_failed::<R, _>("delete", &envelope);
        envelope
    }
}

fn warn_if_failed<R: Resource, T>(verb: &str, envelope: &Envelope<T>) {
    if !envelope.succeeded {
        tracing::warn!(
            resource = R::COLLECTION,
            verb,
            message = %envelope.message,
            "backend exchange failed"
        );
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_ERROR_EXCERPT {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_ERROR_EXCERPT).collect();
    format!("{cut}...")
}

/// Turn a retry outcome into a typed envelope. Never raises: every transport
/// condition becomes `succeeded = false` with a diagnostic message.
async fn resolve<T, F>(outcome: RetryOutcome, decode_data: F) -> Envelope<T>
where
    F: FnOnce(Value) -> Result<T, String>,
{
    match outcome {
        RetryOutcome::Success(response) => match response.text().await {
            Ok(body) => match serde_json::from_str::<WireEnvelope>(&body) {
                Ok(wire) => normalize(wire, decode_data),
                Err(e) => Envelope::failure(format!("malformed response body: {e}")),
            },
            Err(e) => Envelope::failure(format!("failed reading response body: {e}")),
        },
        RetryOutcome::HttpError(response) => http_failure(response).await,
        RetryOutcome::ConnectionError { attempts, source } => {
            Envelope::failure(format!("request failed after {attempts} attempts: {source}"))
        }
        RetryOutcome::NonRetryable(e) => Envelope::failure(format!("request failed: {e}")),
    }
}

/// Like [`resolve`], for operations whose success carries no payload.
async fn resolve_empty(outcome: RetryOutcome) -> Envelope<()> {
    match outcome {
        RetryOutcome::Success(response) => match response.text().await {
            Ok(body) if body.trim().is_empty() => Envelope::success_empty(String::new()),
            Ok(body) => match serde_json::from_str::<WireEnvelope>(&body) {
                Ok(wire) if wire.success => Envelope::success_empty(wire.message),
                Ok(wire) => Envelope::failure_with_errors(wire.message, wire.errors),
                // A 2xx delete with a body we don't recognize still deleted.
                Err(e) => {
                    tracing::debug!("ignoring unparseable delete response body: {e}");
                    Envelope::success_empty(String::new())
                }
            },
            Err(e) => Envelope::failure(format!("failed reading response body: {e}")),
        },
        RetryOutcome::HttpError(response) => http_failure(response).await,
        RetryOutcome::ConnectionError { attempts, source } => {
            Envelope::failure(format!("request failed after {attempts} attempts: {source}"))
        }
        RetryOutcome::NonRetryable(e) => Envelope::failure(format!("request failed: {e}")),
    }
}

/// Normalize a non-2xx response. Prefers the backend's own envelope message
/// when the error body carries one; falls back to a status line with a
/// capped body excerpt.
async fn http_failure<T>(response: reqwest::Response) -> Envelope<T> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(wire) = serde_json::from_str::<WireEnvelope>(&body)
        && !wire.message.is_empty()
    {
        return Envelope::failure_with_errors(wire.message, wire.errors);
    }

    if body.trim().is_empty() {
        Envelope::failure(format!("HTTP {status}"))
    } else {
        Envelope::failure(format!("HTTP {status}: {}", excerpt(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_caps_long_bodies() {
        let long = "x".repeat(500);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), MAX_ERROR_EXCERPT + 3);
        assert!(short.ends_with("..."));
        assert_eq!(excerpt("  tidy  "), "tidy");
    }
}
