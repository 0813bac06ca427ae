//! Request and result types for API calls.

use serde_json::Value;

/// A single API call, constructed fresh per invocation.
///
/// Defaults to an authenticated, https, JSON-parsed call; the builder
/// methods opt out of each.
///
/// # Example
///
/// ```ignore
/// let request = CallRequest::new("2/BTCUSD/money/ticker")
///     .unauthenticated()
///     .raw_response();
/// ```
#[derive(Debug, Clone)]
pub struct CallRequest {
    /// Call path whose first character is the API version digit
    pub path: String,
    /// Request arguments, form-encoded into the payload in order
    pub args: Vec<(String, String)>,
    /// Sign the request (ignored when the client has no credentials)
    pub authenticate: bool,
    /// Use https
    pub secure: bool,
    /// Decode the response body as JSON
    pub parse_response: bool,
}

impl CallRequest {
    /// Create a call to `path` with no arguments.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            authenticate: true,
            secure: true,
            parse_response: true,
        }
    }

    /// Append a request argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.args.push((key.into(), value.to_string()));
        self
    }

    /// Skip request signing.
    pub fn unauthenticated(mut self) -> Self {
        self.authenticate = false;
        self
    }

    /// Use plain http instead of https.
    pub fn insecure(mut self) -> Self {
        self.secure = false;
        self
    }

    /// Return the response body without JSON decoding.
    pub fn raw_response(mut self) -> Self {
        self.parse_response = false;
        self
    }
}

/// Body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallData {
    /// JSON-decoded response
    Json(Value),
    /// Undecoded response text
    Raw(String),
}

impl CallData {
    /// Returns the decoded JSON value, if the response was parsed.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            CallData::Json(value) => Some(value),
            CallData::Raw(_) => None,
        }
    }

    /// Returns the raw body, if the response was left unparsed.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            CallData::Json(_) => None,
            CallData::Raw(body) => Some(body),
        }
    }
}

/// Uniform result envelope returned by every call.
///
/// An HTTP status failure from the remote is data, not an error; only
/// transport, configuration and decode faults surface as
/// [`ClientError`](crate::error::ClientError).
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The remote answered with a 2xx status
    Success {
        /// Response body, decoded or raw
        data: CallData,
    },
    /// The remote answered with a non-2xx status
    Failure {
        /// HTTP status code
        code: u16,
        /// Status reason phrase
        reason: String,
    },
}

impl CallOutcome {
    /// Returns true for a 2xx outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }

    /// Returns true for a non-2xx outcome.
    pub fn is_failure(&self) -> bool {
        matches!(self, CallOutcome::Failure { .. })
    }
}
