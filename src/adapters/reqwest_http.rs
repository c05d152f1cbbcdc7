//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production HTTP client implementation using
//! reqwest, implementing the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ChatError, ChatResult, TransportError};
use crate::traits::{ByteStream, Headers, HttpClient};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use streamchat::adapters::ReqwestHttpClient;
/// use streamchat::traits::{chat_request_headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let body = client
///     .post_stream("http://localhost:5000/chat_stream", r#"{"message":"hi"}"#, &chat_request_headers())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client from configuration.
    ///
    /// Only a connect timeout is applied; reading the body has no deadline.
    pub fn from_config(config: &ClientConfig) -> ChatResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert a request error to TransportError.
    fn convert_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }

    /// Convert an error raised while reading the body.
    fn convert_read_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else {
            TransportError::Read(err.to_string())
        }
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Chat endpoint returned an error status");
            return Err(TransportError::from_status_body(status.as_u16(), &body));
        }

        debug!(status = status.as_u16(), "Streaming response opened");
        let stream = response
            .bytes_stream()
            .map(|result| result.map_err(Self::convert_read_error));

        Ok(Box::pin(stream))
    }
}
