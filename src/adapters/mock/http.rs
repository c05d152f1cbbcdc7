//! Mock HTTP client for testing.
//!
//! Responses are queued and handed out in order, one per request, so a test
//! can script several consecutive submissions against the same endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use futures::channel::mpsc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::TransportError;
use crate::traits::{ByteStream, Headers, HttpClient};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Sending half of a [`MockResponse::Channel`] body.
pub type MockBodySender = mpsc::UnboundedSender<Result<Bytes, TransportError>>;

/// Configuration for a mock response.
#[derive(Debug)]
pub enum MockResponse {
    /// Stream these chunks, then end the body
    Stream(Vec<Bytes>),
    /// Stream these chunks, then fail the read
    StreamThenError(Vec<Bytes>, TransportError),
    /// Answer with a non-2xx status and this body
    Status { status: u16, body: Bytes },
    /// Fail before any response arrives
    Error(TransportError),
    /// Body driven by the test; stays open until the sender is dropped
    Channel(mpsc::UnboundedReceiver<Result<Bytes, TransportError>>),
}

impl MockResponse {
    /// Stream a body split into the given string chunks.
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|chunk| Bytes::from(chunk.into()))
                .collect(),
        )
    }

    /// Non-2xx response with a JSON `{"error": ...}` body.
    pub fn status_json(status: u16, json: &str) -> Self {
        MockResponse::Status {
            status,
            body: Bytes::from(json.to_string()),
        }
    }

    /// Open-ended body plus the sender that feeds it.
    pub fn channel() -> (MockBodySender, Self) {
        let (tx, rx) = mpsc::unbounded();
        (tx, MockResponse::Channel(rx))
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use streamchat::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.push_response(MockResponse::chunks(["data: Hel\n\n", "data: lo\n\n"]));
///
/// // ... drive a session ...
///
/// let requests = client.get_requests();
/// assert_eq!(requests[0].body, r#"{"message":"hi"}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Queued responses, consumed front to back
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record_request(&self, url: &str, body: &str, headers: &Headers) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError> {
        self.record_request(url, body, headers);

        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::Status { status, body }) => {
                Err(TransportError::from_status_body(status, &body))
            }
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Channel(rx)) => Ok(Box::pin(rx)),
            None => Err(TransportError::Other(format!(
                "No mock response queued for URL: {}",
                url
            ))),
        }
    }
}
