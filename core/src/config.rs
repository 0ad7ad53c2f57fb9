//! Client configuration.
//!
//! Every field is optional. A config with no API key is accepted; the
//! upstream service answers such requests with an unauthorized envelope.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

pub const API_HOST: &str = "www.bungie.net";
pub const BASE_PATH: &str = "/Platform/Destiny2";
pub const OAUTH_AUTHORIZE_URL: &str = "https://www.bungie.net/en/OAuth/Authorize/";
pub const DEFAULT_USER_AGENT: &str = concat!("destiny2-core/", env!("CARGO_PKG_VERSION"));

pub const ENV_API_KEY: &str = "DESTINY2_API_KEY";
pub const ENV_USER_AGENT: &str = "DESTINY2_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "DESTINY2_TIMEOUT_SECS";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Sent as `X-API-Key` on every request.
    pub api_key: Option<String>,
    /// Falls back to [`DEFAULT_USER_AGENT`].
    pub user_agent: Option<String>,
    /// Kept for callers that drive the OAuth flow themselves.
    pub oauth: Option<OAuthConfig>,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
}

/// OAuth application credentials.
///
/// No implemented endpoint needs OAuth.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub authorize_url: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            authorize_url: OAUTH_AUTHORIZE_URL.to_string(),
        }
    }
}

const REDACTED: &str = "<redacted>";

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| REDACTED)
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("user_agent", &self.user_agent)
            .field("oauth", &self.oauth)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("authorize_url", &self.authorize_url)
            .finish()
    }
}

impl ClientConfig {
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Read `DESTINY2_API_KEY`, `DESTINY2_USER_AGENT` and
    /// `DESTINY2_TIMEOUT_SECS`. Unset variables stay `None`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}"))
            })?),
            None => None,
        };
        Ok(Self {
            api_key: lookup(ENV_API_KEY),
            user_agent: lookup(ENV_USER_AGENT),
            oauth: None,
            timeout_secs,
        })
    }
}
