//! Error handling for the chat client.
//!
//! - [`TransportError`]: network and HTTP failures
//! - [`ChatError`]: everything that can end an exchange, with the text
//!   rendered to the user
//! - [`ChatResult`]: result alias over [`ChatError`]

mod chat_error;
mod transport;

pub use chat_error::{ChatError, ERROR_ANNOTATION_PREFIX};
pub use transport::TransportError;

/// Result alias for fallible chat client operations.
pub type ChatResult<T> = Result<T, ChatError>;
