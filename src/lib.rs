//! Client for the MtGox versioned HTTP API.
//!
//! The API is exposed as a single signed-call primitive: [`ApiClient::call`]
//! builds the request URL from the version-prefixed path, injects a nonce and
//! HMAC-SHA512 signature headers for authenticated calls, dispatches the
//! request and normalizes the outcome into a uniform [`CallOutcome`]
//! envelope.
//!
//! # Example
//!
//! ```ignore
//! use mtgox_client::{ApiClient, CallRequest, Credentials};
//!
//! let api = ApiClient::new(Some(Credentials::new("key", "base64-secret")))?;
//!
//! // Public market data, no signing
//! let ticker = api
//!     .call(CallRequest::new("2/BTCUSD/money/ticker").unauthenticated())
//!     .await?;
//!
//! // Signed call against the private API
//! let info = api.call(CallRequest::new("2/money/info")).await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{ApiClient, AuthMode};
pub use config::{Credentials, Endpoints, RestConfig};
pub use error::{ClientError, ClientResult};
pub use types::{CallData, CallOutcome, CallRequest};
