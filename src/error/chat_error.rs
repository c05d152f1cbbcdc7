//! Unified error type for the chat client.

use thiserror::Error;

use super::transport::TransportError;

/// Prefix of every error text rendered into the conversation.
pub const ERROR_ANNOTATION_PREFIX: &str = "Sorry, an error occurred: ";

/// Errors that can end an exchange or stop the client.
///
/// `Protocol` errors are recovered where they occur and only logged;
/// `Transport` and `ServerReported` errors are terminal for the exchange and
/// always rendered.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP transport failed before or during streaming.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server sent an explicit `event: error` frame.
    #[error("server reported an error: {message}")]
    ServerReported { message: String },

    /// A frame payload could not be interpreted.
    #[error("malformed {event} payload: {detail}")]
    Protocol { event: String, detail: String },

    /// Client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChatError {
    /// Text rendered into the conversation for this error.
    pub fn user_message(&self) -> String {
        let detail = match self {
            ChatError::Transport(err) => err.message().to_string(),
            ChatError::ServerReported { message } => message.clone(),
            ChatError::Protocol { detail, .. } => detail.clone(),
            ChatError::Config(message) => message.clone(),
        };
        format!("{}{}", ERROR_ANNOTATION_PREFIX, detail)
    }

    /// Whether resubmitting could succeed. Nothing is retried automatically.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Transport(err) => err.is_retryable(),
            ChatError::ServerReported { .. } => true,
            ChatError::Protocol { .. } | ChatError::Config(_) => false,
        }
    }

    /// Short stable code used in log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Transport(TransportError::Status { .. }) => "TRANSPORT_STATUS",
            ChatError::Transport(_) => "TRANSPORT",
            ChatError::ServerReported { .. } => "SERVER_REPORTED",
            ChatError::Protocol { .. } => "PROTOCOL",
            ChatError::Config(_) => "CONFIG",
        }
    }
}
