//! Client configuration
//!
//! Credentials and region normally come from the environment; the token and
//! API base URLs are derived from the region but can be overridden, which
//! tests use to point the client at a local mock server.

use crate::{Error, Region, Result};

/// Default locale applied to every data request unless the caller overrides it
pub const DEFAULT_LOCALE: &str = "en_US";

/// Configuration for the Blizzard API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub client_id: String,
    pub client_secret: String,
    pub region: Region,
    pub locale: String,
    token_url: String,
    api_base: String,
}

impl ApiConfig {
    /// Create a configuration with region-derived endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            region,
            locale: DEFAULT_LOCALE.to_string(),
            token_url: format!("https://{region}.battle.net/oauth/token"),
            api_base: format!("https://{region}.api.blizzard.com"),
        }
    }

    /// Read credentials and region from the environment.
    ///
    /// `BLIZZARD_CLIENT_ID` and `BLIZZARD_CLIENT_SECRET` are required;
    /// `BLIZZARD_REGION` and `BLIZZARD_LOCALE` fall back to `us` / `en_US`.
    pub fn from_env() -> Result<Self> {
        let client_id = required_env("BLIZZARD_CLIENT_ID")?;
        let client_secret = required_env("BLIZZARD_CLIENT_SECRET")?;
        let region = match std::env::var("BLIZZARD_REGION") {
            Ok(value) => value.parse()?,
            Err(_) => Region::US,
        };

        let mut config = Self::new(client_id, client_secret, region);
        if let Ok(locale) = std::env::var("BLIZZARD_LOCALE") {
            config.locale = locale;
        }
        Ok(config)
    }

    /// Set the locale merged into every data request
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Override the OAuth token endpoint
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the data API base URL
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into().trim_end_matches('/').to_string();
        self
    }

    /// The OAuth client-credentials token endpoint
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// The data API base URL
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL for a path under the API base
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_base)
        } else {
            format!("{}/{path}", self.api_base)
        }
    }

    /// Namespace parameter value for a payload family, e.g. `profile-us`
    pub fn namespace(&self, family: &str) -> String {
        format!("{family}-{}", self.region)
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("{name} is not set")))
}
