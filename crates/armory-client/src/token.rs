//! OAuth2 client-credentials token management

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::{ApiConfig, Error, Result};

/// Safety margin subtracted from the server-reported token lifetime
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// A bearer token with its margin-adjusted expiry.
///
/// Tokens are never mutated in place; a refresh replaces the whole value.
#[derive(Debug, Clone)]
pub struct BearerToken {
    secret: String,
    expires_at: Instant,
}

impl BearerToken {
    /// Build a token from the server-reported lifetime. The expiry margin is
    /// applied here, so a token within 60 seconds of its real expiry already
    /// reads as expired.
    pub fn new(secret: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            secret: secret.into(),
            expires_at: Instant::now() + expires_in.saturating_sub(EXPIRY_MARGIN),
        }
    }

    /// The token value used in the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether the token is past its margin-adjusted expiry
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Obtains and caches an OAuth2 client-credentials bearer token.
///
/// Safe for concurrent use. Two callers that both observe an expired token
/// will both request a fresh one; the last write wins, which only costs a
/// duplicate token request, so no mutual exclusion is taken around the
/// refresh itself.
pub struct TokenManager {
    client: Client,
    config: ApiConfig,
    current: RwLock<Option<BearerToken>>,
}

impl TokenManager {
    /// Create a manager sharing the given HTTP client
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self {
            client,
            config,
            current: RwLock::new(None),
        }
    }

    /// Return a valid bearer secret, refreshing when necessary.
    pub async fn token(&self) -> Result<String> {
        if let Some(token) = self.current.read().await.as_ref() {
            if !token.is_expired() {
                trace!("reusing cached bearer token");
                return Ok(token.secret().to_string());
            }
        }

        let token = self.fetch_token().await?;
        let secret = token.secret().to_string();
        *self.current.write().await = Some(token);
        Ok(secret)
    }

    /// Request a fresh token from the OAuth endpoint. Failures are not
    /// retried here; the gateway's retry policy does not apply to
    /// authentication.
    async fn fetch_token(&self) -> Result<BearerToken> {
        debug!(url = self.config.token_url(), "requesting new bearer token");

        let response = self
            .client
            .post(self.config.token_url())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::authentication(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::authentication(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::authentication(format!("malformed token response: {e}")))?;

        debug!(expires_in = body.expires_in, "bearer token refreshed");
        Ok(BearerToken::new(
            body.access_token,
            Duration::from_secs(body.expires_in),
        ))
    }
}
