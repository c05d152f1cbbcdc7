use serde::{Deserialize, Serialize};

/// Body of the outbound chat request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message, already trimmed
    pub message: String,
}

impl ChatRequest {
    /// Create a request for a single user message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Serialize to the JSON request body
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
