//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TerminalRenderer`] - renderer printing to a terminal
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - queued HTTP responses
//! - [`mock::RecordingRenderer`] - in-memory message log

pub mod mock;
pub mod reqwest_http;
pub mod terminal_renderer;

pub use mock::{MockHttpClient, RecordingRenderer};
pub use reqwest_http::ReqwestHttpClient;
pub use terminal_renderer::{TerminalMessageHandle, TerminalRenderer};
