//! Error types for the API client.
//!
//! Only hard faults live here. An HTTP status failure returned by the remote
//! is expected behavior and is reported as data through
//! [`CallOutcome::Failure`](crate::types::CallOutcome), never as an error.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Hard faults that terminate a call.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ClientError {
    /// Configuration error (malformed base64 secret, client construction)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The call path does not carry a leading API version digit
    #[error("Invalid API path: {0}")]
    InvalidPath(String),

    /// Transport fault without HTTP semantics (DNS, connection, TLS)
    #[error("Request error: {0}")]
    Request(String),

    /// Response body requested as JSON but not decodable
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Returns true if this is a transport-level fault.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Request(_))
    }

    /// Returns true if this is a response decode fault.
    pub fn is_parse(&self) -> bool {
        matches!(self, ClientError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Configuration("invalid base64 API secret".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid base64 API secret"
        );

        let err = ClientError::InvalidPath("money/info".to_string());
        assert!(err.to_string().contains("money/info"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(ClientError::Request("connection refused".to_string()).is_transport());
        assert!(ClientError::Parse("expected value".to_string()).is_parse());
        assert!(!ClientError::Parse("expected value".to_string()).is_transport());
    }
}
