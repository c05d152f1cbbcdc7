//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming HTTP POST
//! - [`Renderer`] / [`MessageHandle`] - message display

pub mod http;
pub mod renderer;

pub use http::{chat_request_headers, ByteStream, Headers, HttpClient};
pub use renderer::{MessageHandle, Renderer, Sender};
