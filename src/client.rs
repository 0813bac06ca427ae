//! The API client and its single `call` operation.
//!
//! `call` resolves the target host from the authentication decision, builds
//! the form-encoded payload, signs it according to the API version embedded
//! in the path and normalizes the response into a [`CallOutcome`]. One HTTP
//! attempt per call; no retry, no backoff.

use reqwest::{header, Client};
use tracing::debug;

use crate::auth::{encode_form, generate_nonce, scheme_for_version, HmacSigner};
use crate::config::{Credentials, Endpoints, RestConfig};
use crate::error::{ClientError, ClientResult};
use crate::types::{CallData, CallOutcome, CallRequest};

/// Authentication override carried by a client copy.
///
/// `Auto` signs whenever the call asks for it and credentials exist.
/// `Public` never signs and targets the market-data host. `Private` signs
/// every call that can be signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Sign when requested and credentials are available
    #[default]
    Auto,
    /// Never sign
    Public,
    /// Always sign when credentials are available
    Private,
}

/// Client for the versioned HTTP API.
///
/// Holds credentials (optional) and transport configuration; all per-call
/// state is local to [`call`](ApiClient::call), so one instance can be
/// shared across tasks.
///
/// # Example
///
/// ```ignore
/// let api = ApiClient::new(Some(Credentials::new(key, secret)))?;
///
/// let ticker = api
///     .call(CallRequest::new("2/BTCUSD/money/ticker").unauthenticated())
///     .await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying HTTP client
    http: Client,
    /// Credentials; absence disables signing for all calls
    credentials: Option<Credentials>,
    /// Target hosts
    endpoints: Endpoints,
    /// Authentication override
    auth_mode: AuthMode,
}

impl ApiClient {
    /// Create a client with default endpoints and transport configuration.
    pub fn new(credentials: Option<Credentials>) -> ClientResult<Self> {
        Self::with_config(credentials, Endpoints::default(), RestConfig::default())
    }

    /// Create a client with explicit endpoints and transport configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_config(
        credentials: Option<Credentials>,
        endpoints: Endpoints,
        config: RestConfig,
    ) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            credentials,
            endpoints,
            auth_mode: AuthMode::Auto,
        })
    }

    /// Copy of this client that never signs.
    pub fn public(&self) -> Self {
        let mut copy = self.clone();
        copy.auth_mode = AuthMode::Public;
        copy
    }

    /// Copy of this client that signs every call it can.
    pub fn private(&self) -> Self {
        let mut copy = self.clone();
        copy.auth_mode = AuthMode::Private;
        copy
    }

    /// The client's authentication override.
    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Returns true if credentials were supplied at construction.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Call the API.
    ///
    /// Returns `Ok(CallOutcome::Failure { .. })` for a non-2xx HTTP status;
    /// every other fault (transport without HTTP semantics, malformed
    /// secret, undecodable JSON) is a hard [`ClientError`].
    pub async fn call(&self, request: CallRequest) -> ClientResult<CallOutcome> {
        let path = request.path.trim_start_matches('/');

        // never sign without a key, whatever the caller asked for
        let authenticate = match self.auth_mode {
            AuthMode::Public => false,
            AuthMode::Private => self.credentials.is_some(),
            AuthMode::Auto => request.authenticate && self.credentials.is_some(),
        };

        let host = if authenticate {
            &self.endpoints.authenticated_host
        } else {
            &self.endpoints.public_host
        };
        let scheme = if request.secure { "https" } else { "http" };
        let url = format!("{}://{}/api/{}", scheme, host, path);

        let mut args = request.args;
        if authenticate {
            // the nonce is owned by the client, not the caller
            args.retain(|(key, _)| key != "nonce");
            args.push(("nonce".to_string(), generate_nonce().to_string()));
        }
        let payload = encode_form(&args);

        let method = if payload.is_empty() { "GET" } else { "POST" };
        let mut http_request = if payload.is_empty() {
            self.http.get(&url)
        } else {
            self.http
                .post(&url)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(payload.clone())
        };

        if authenticate {
            if let Some(credentials) = &self.credentials {
                let version = path
                    .chars()
                    .next()
                    .and_then(|c| c.to_digit(10))
                    .ok_or_else(|| {
                        ClientError::InvalidPath(format!(
                            "path must start with an API version digit: {}",
                            request.path
                        ))
                    })?;

                let signer = HmacSigner::new(credentials);
                let signature =
                    signer.sign(scheme_for_version(version), path, payload.as_bytes())?;
                http_request = http_request
                    .header(signer.api_key_header(), signer.api_key())
                    .header(signer.signature_header(), signature);
            }
        }

        debug!("{} {} (authenticated: {})", method, url, authenticate);

        let response = http_request
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(CallOutcome::Failure {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Request(format!("failed to read response: {}", e)))?;

        let data = if request.parse_response {
            let value = serde_json::from_str(&body)
                .map_err(|e| ClientError::Parse(format!("invalid JSON response: {}", e)))?;
            CallData::Json(value)
        } else {
            CallData::Raw(body)
        };

        Ok(CallOutcome::Success { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode_copies() {
        let api = ApiClient::new(None).unwrap();
        assert_eq!(api.auth_mode(), AuthMode::Auto);

        let public = api.public();
        assert_eq!(public.auth_mode(), AuthMode::Public);
        // the original is untouched
        assert_eq!(api.auth_mode(), AuthMode::Auto);

        let private = public.private();
        assert_eq!(private.auth_mode(), AuthMode::Private);
    }

    #[test]
    fn test_has_credentials() {
        let api = ApiClient::new(None).unwrap();
        assert!(!api.has_credentials());

        let api = ApiClient::new(Some(Credentials::new("key", "c2VjcmV0"))).unwrap();
        assert!(api.has_credentials());
    }
}
