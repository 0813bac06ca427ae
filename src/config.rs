//! Configuration types for the API client.
//!
//! These types are designed to be deserialized from TOML configuration files;
//! credentials can additionally be loaded from the environment or from a JSON
//! credentials file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Hosts targeted by API calls.
///
/// Authenticated calls go to the main host, unauthenticated calls to the
/// market-data host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// Host for authenticated calls
    #[serde(default = "default_authenticated_host")]
    pub authenticated_host: String,
    /// Host for public market-data calls
    #[serde(default = "default_public_host")]
    pub public_host: String,
}

fn default_authenticated_host() -> String {
    "mtgox.com".to_string()
}

fn default_public_host() -> String {
    "data.mtgox.com".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authenticated_host: default_authenticated_host(),
            public_host: default_public_host(),
        }
    }
}

/// REST transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    concat!("mtgox-client/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl RestConfig {
    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// API credentials.
///
/// The secret stays base64-encoded until signing time; an undecodable secret
/// surfaces as a hard fault on the first signed call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    /// API key identifier
    #[serde(rename = "Key")]
    pub key: String,
    /// Base64-encoded signing secret
    #[serde(rename = "Secret")]
    pub secret: String,
}

impl Credentials {
    /// Create credentials from a key and a base64-encoded secret.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Returns None if either variable is not set.
    pub fn from_env(key_env: &str, secret_env: &str) -> Option<Self> {
        let key = std::env::var(key_env).ok()?;
        let secret = std::env::var(secret_env).ok()?;
        Some(Self { key, secret })
    }

    /// Load credentials from a JSON file with `Key` and `Secret` fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold both
    /// fields.
    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::Configuration(format!("failed to read credentials file: {}", e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ClientError::Configuration(format!("malformed credentials file: {}", e))
        })
    }
}
