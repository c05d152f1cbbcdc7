//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::{controller_with_mock, sse_body};
//!
//! let (mut controller, client, renderer) = controller_with_mock();
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use streamchat::adapters::mock::{MockHttpClient, RecordingRenderer};
use streamchat::adapters::ReqwestHttpClient;
use streamchat::config::ClientConfig;
use streamchat::session::SessionController;

pub type MockController = SessionController<MockHttpClient, RecordingRenderer>;

/// Endpoint used with the mock HTTP client.
pub const TEST_ENDPOINT: &str = "http://test.local/chat_stream";

/// Controller over a mock client plus handles to observe both sides.
pub fn controller_with_mock() -> (MockController, Arc<MockHttpClient>, RecordingRenderer) {
    let client = Arc::new(MockHttpClient::new());
    let renderer = RecordingRenderer::new();
    let config = ClientConfig::default().with_endpoint(TEST_ENDPOINT);
    let controller = SessionController::new(Arc::clone(&client), renderer.clone(), &config);
    (controller, client, renderer)
}

/// Controller talking HTTP to `endpoint`.
pub fn controller_with_reqwest(
    endpoint: &str,
) -> (
    SessionController<ReqwestHttpClient, RecordingRenderer>,
    RecordingRenderer,
) {
    let config = ClientConfig::default().with_endpoint(endpoint);
    let client = ReqwestHttpClient::from_config(&config).expect("client should build");
    let renderer = RecordingRenderer::new();
    let controller = SessionController::new(Arc::new(client), renderer.clone(), &config);
    (controller, renderer)
}

/// Encode records into a stream body.
pub fn sse_body(records: &[&str]) -> String {
    records
        .iter()
        .map(|record| format!("{}\n\n", record))
        .collect()
}

/// Split a byte body into chunks of `size` bytes, ignoring char boundaries.
pub fn split_bytes(body: &[u8], size: usize) -> Vec<bytes::Bytes> {
    body.chunks(size)
        .map(bytes::Bytes::copy_from_slice)
        .collect()
}
