//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with queued responses
//! - [`RecordingRenderer`] - renderer that records messages in memory

pub mod http;
pub mod renderer;

pub use http::{MockBodySender, MockHttpClient, MockResponse, RecordedRequest};
pub use renderer::{RecordedMessageHandle, RecordingRenderer, RenderedMessage};
