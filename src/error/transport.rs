//! Transport-level error types.
//!
//! Failures of the HTTP exchange that carries the event stream: connection
//! problems, non-2xx responses and body read errors.

use thiserror::Error;

use crate::models::ErrorBody;

/// A failure of the HTTP transport before or during streaming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection to the server could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connecting took longer than the configured limit.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Reading the response body failed mid-stream.
    #[error("stream read failed: {0}")]
    Read(String),

    /// The request could not be built (bad URL, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Anything else reported by the HTTP client.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The server replies with `{"error": "<message>"}`; that string becomes
    /// the message. Bodies without it fall back to `server error: <status>`.
    pub fn from_status_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("server error: {}", status));

        TransportError::Status { status, message }
    }

    /// HTTP status code, if the failure was a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The detail shown to the user, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            TransportError::ConnectionFailed(message)
            | TransportError::Timeout(message)
            | TransportError::Read(message)
            | TransportError::InvalidRequest(message)
            | TransportError::Other(message) => message,
            TransportError::Status { message, .. } => message,
        }
    }

    /// Whether resubmitting the same message could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::ConnectionFailed(_)
            | TransportError::Timeout(_)
            | TransportError::Read(_) => true,
            TransportError::Status { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            TransportError::InvalidRequest(_) | TransportError::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_body_uses_error_field() {
        let err = TransportError::from_status_body(500, br#"{"error":"overloaded"}"#);
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                message: "overloaded".to_string()
            }
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), "overloaded");
    }

    #[test]
    fn test_from_status_body_falls_back_on_plain_text() {
        let err = TransportError::from_status_body(502, b"Bad Gateway");
        assert_eq!(err.message(), "server error: 502");
    }

    #[test]
    fn test_from_status_body_falls_back_on_missing_field() {
        let err = TransportError::from_status_body(400, br#"{"detail":"nope"}"#);
        assert_eq!(err.message(), "server error: 400");

        let err = TransportError::from_status_body(400, br#"{"error":"  "}"#);
        assert_eq!(err.message(), "server error: 400");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransportError::ConnectionFailed("refused".to_string()).to_string(),
            "connection failed: refused"
        );
        assert_eq!(
            TransportError::Status {
                status: 503,
                message: "busy".to_string()
            }
            .to_string(),
            "HTTP 503: busy"
        );
        assert_eq!(
            TransportError::Read("reset".to_string()).to_string(),
            "stream read failed: reset"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(TransportError::ConnectionFailed("x".to_string()).is_retryable());
        assert!(TransportError::Timeout("x".to_string()).is_retryable());
        assert!(TransportError::from_status_body(500, b"").is_retryable());
        assert!(TransportError::from_status_body(429, b"").is_retryable());
        assert!(!TransportError::from_status_body(400, b"").is_retryable());
        assert!(!TransportError::InvalidRequest("x".to_string()).is_retryable());
    }

    #[test]
    fn test_status_only_for_status_errors() {
        assert_eq!(TransportError::Read("x".to_string()).status(), None);
        assert_eq!(TransportError::Other("x".to_string()).status(), None);
    }
}
