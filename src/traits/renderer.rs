//! Rendering abstraction for chat messages.
//!
//! The session controller never draws anything itself. It appends messages
//! through a [`Renderer`] and updates them through the returned
//! [`MessageHandle`].

use std::fmt;

/// Author of a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message that has already been rendered and can still be updated.
pub trait MessageHandle {
    /// Replace the whole text of the message.
    fn set_text(&mut self, text: &str);

    /// Remove the "awaiting first token" indicator.
    fn clear_placeholder(&mut self);

    /// Display the message as an error.
    fn mark_error(&mut self);
}

/// Surface that displays the conversation.
pub trait Renderer {
    type Handle: MessageHandle;

    /// Append a message and return a handle for later updates.
    ///
    /// `is_placeholder` shows the awaiting indicator; `is_error` displays the
    /// message as an error from the start.
    fn append_message(
        &mut self,
        text: &str,
        sender: Sender,
        is_placeholder: bool,
        is_error: bool,
    ) -> Self::Handle;

    /// Clear whatever input the user typed. No-op for surfaces without one.
    fn clear_input(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }
}
