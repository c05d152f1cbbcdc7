//! One user message and the bot reply it produced.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle of an [`Exchange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeStatus {
    /// Created, request not issued yet
    #[default]
    Pending,
    /// Request issued, reply arriving
    Streaming,
    /// Transport finished without error
    Complete,
    /// Transport or server error ended the reply
    Errored,
}

impl ExchangeStatus {
    /// Whether the reply text can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExchangeStatus::Complete | ExchangeStatus::Errored)
    }
}

/// A user message paired with its (possibly in-progress) bot reply.
///
/// `bot_text` only grows while streaming and is frozen once the status is
/// terminal. Every mutator reports whether it changed anything.
#[derive(Debug, Clone)]
pub struct Exchange {
    id: Uuid,
    user_text: String,
    bot_text: String,
    status: ExchangeStatus,
    started_at: DateTime<Utc>,
}

impl Exchange {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_text: user_text.into(),
            bot_text: String::new(),
            status: ExchangeStatus::Pending,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn bot_text(&self) -> &str {
        &self.bot_text
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Milliseconds since the exchange was created.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }

    /// Pending → Streaming.
    pub fn begin_streaming(&mut self) -> bool {
        if self.status != ExchangeStatus::Pending {
            return false;
        }
        self.status = ExchangeStatus::Streaming;
        true
    }

    /// Append a token. Only accepted while streaming.
    pub fn append(&mut self, text: &str) -> bool {
        if self.status != ExchangeStatus::Streaming || text.is_empty() {
            return false;
        }
        self.bot_text.push_str(text);
        true
    }

    /// Mark the reply complete unless it already ended.
    pub fn complete(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = ExchangeStatus::Complete;
        true
    }

    /// Mark the reply errored and add the error annotation.
    ///
    /// With no reply text yet the annotation becomes the whole text;
    /// otherwise it goes on a new line after what was received.
    pub fn fail(&mut self, annotation: &str) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        if !self.bot_text.is_empty() {
            self.bot_text.push('\n');
        }
        self.bot_text.push_str(annotation);
        self.status = ExchangeStatus::Errored;
        true
    }
}
