//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the streaming POST the chat client
//! issues, enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

use crate::error::TransportError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Chunked response body. Each item is one network chunk as received.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Headers sent with every chat request.
pub fn chat_request_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client for testing.
///
/// # Example
///
/// ```ignore
/// use streamchat::traits::{chat_request_headers, HttpClient};
///
/// async fn open<C: HttpClient>(client: &C) -> Result<ByteStream, TransportError> {
///     client
///         .post_stream("http://localhost:5000/chat_stream", r#"{"message":"hi"}"#, &chat_request_headers())
///         .await
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response body as a stream.
    ///
    /// A non-2xx response resolves to [`TransportError::Status`] before any
    /// chunk is yielded; its message is taken from the `{"error": ...}` body.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `body` - Request body as a string
    /// * `headers` - Request headers
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_headers() {
        let headers = chat_request_headers();
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );
    }
}
