//! Authenticated, cached GET gateway
//!
//! The gateway is endpoint-agnostic: it knows how to attach the bearer
//! token and default locale, consult the response cache, and retry
//! transient failures. Which URLs to hit and how to interpret their
//! payloads is the domain client's business.

use std::sync::Arc;
use std::time::Duration;

use armory_cache::{CacheStore, cache_key};
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::{ApiConfig, Error, Result, RetryPolicy, TokenManager};

/// TTL for reference data that changes at most with a game patch
const STATIC_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL for live character data
const DYNAMIC_TTL: Duration = Duration::from_secs(5 * 60);

/// Request timeout applied to the default HTTP client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cache classification for a response payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Game reference data: classes, specializations, media
    Static,
    /// Character state, re-fetched on a minutes scale
    Dynamic,
}

impl Payload {
    /// Cache TTL for this payload class
    pub fn ttl(self) -> Duration {
        match self {
            Self::Static => STATIC_TTL,
            Self::Dynamic => DYNAMIC_TTL,
        }
    }
}

/// Authenticated GET client with response caching and bounded retries
pub struct HttpGateway {
    client: Client,
    tokens: TokenManager,
    cache: Arc<dyn CacheStore>,
    retry: RetryPolicy,
    config: ApiConfig,
}

impl HttpGateway {
    /// Create a gateway with a default HTTP client
    pub fn new(config: ApiConfig, cache: Arc<dyn CacheStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(&e))?;
        Ok(Self::with_client(client, config, cache))
    }

    /// Create a gateway with a custom reqwest client
    pub fn with_client(client: Client, config: ApiConfig, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            tokens: TokenManager::new(client.clone(), config.clone()),
            client,
            cache,
            retry: RetryPolicy::default(),
            config,
        }
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The configuration this gateway was built with
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `url`, merging the default locale under `params` (caller
    /// parameters win on conflict), and deserialize the JSON response.
    ///
    /// A cached, unexpired response short-circuits the whole request; no
    /// network call and no token fetch happen on a hit.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        payload: Payload,
    ) -> Result<T> {
        let mut merged: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        if !params.iter().any(|&(name, _)| name == "locale") {
            merged.push(("locale", self.config.locale.as_str()));
        }
        merged.extend_from_slice(params);

        let key = cache_key(url, &merged).map_err(|e| Error::upstream(500, e.to_string()))?;

        if let Some(body) = self.cache_get(&key).await {
            // A cached body that no longer decodes is treated as a miss;
            // the entry is superseded by the re-fetch below.
            match serde_json::from_slice(&body) {
                Ok(value) => {
                    trace!(key = %key, "response cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "cached body failed to decode, refetching");
                }
            }
        }

        let body = self.fetch(url, &merged).await?;
        self.cache_put(&key, body.clone(), payload.ttl()).await;
        Ok(serde_json::from_slice(&body)?)
    }

    /// A backend failure degrades to a miss; caching is an optimization,
    /// never a correctness dependency.
    async fn cache_get(&self, key: &str) -> Option<Bytes> {
        match self.cache.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    async fn cache_put(&self, key: &str, body: Bytes, ttl: Duration) {
        if let Err(e) = self.cache.put(key, body, ttl).await {
            warn!(key, error = %e, "cache write failed, response not cached");
        }
    }

    /// Issue the request, retrying transient failures per the policy.
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<Bytes> {
        let token = self.tokens.token().await?;
        let mut last_error = None;

        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                let backoff = self.retry.backoff.delay(attempt - 1);
                debug!(url, attempt, ?backoff, "retrying after backoff");
                sleep(backoff).await;
            }

            debug!(url, attempt = attempt + 1, "GET");

            let response = match self
                .client
                .get(url)
                .bearer_auth(&token)
                .query(params)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    // Transport failures carry status 500, which is in the
                    // transient set.
                    if attempt < self.retry.max_retries {
                        warn!(url, error = %e, "transport error, will retry");
                        last_error = Some(Error::transport(&e));
                        continue;
                    }
                    return Err(Error::transport(&e));
                }
            };

            let status = response.status();
            if status.is_success() {
                trace!(url, %status, "upstream success");
                return response.bytes().await.map_err(|e| Error::transport(&e));
            }

            let error = upstream_error(status.as_u16(), response.text().await.ok());
            if RetryPolicy::is_transient(status) && attempt < self.retry.max_retries {
                warn!(url, %status, "transient upstream status, will retry");
                last_error = Some(error);
                continue;
            }
            return Err(error);
        }

        // Only reachable when every attempt failed with a transient error.
        Err(last_error.unwrap_or_else(|| Error::upstream(500, "request failed")))
    }
}

/// Build an upstream error, preferring a human-readable message from the
/// error body when one is present.
fn upstream_error(status: u16, body: Option<String>) -> Error {
    let message = body
        .filter(|b| !b.trim().is_empty())
        .map(|b| extract_message(&b).unwrap_or(b))
        .unwrap_or_else(|| format!("HTTP {status}"));
    Error::upstream(status, message)
}

/// Pull the first recognizable message field out of a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for field in ["detail", "error_description", "error", "message"] {
        if let Some(text) = value.get(field).and_then(serde_json::Value::as_str) {
            return Some(text.to_string());
        }
    }
    None
}
