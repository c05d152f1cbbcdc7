//! Recording renderer for testing.
//!
//! Keeps every appended message in memory so tests can assert on the final
//! text, flags and how many times a message was updated.

use std::sync::{Arc, Mutex};

use crate::traits::{MessageHandle, Renderer, Sender};

/// Snapshot of one rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub text: String,
    /// Awaiting indicator still shown
    pub placeholder: bool,
    /// Displayed as an error
    pub error: bool,
    /// Number of `set_text` calls after the message was appended
    pub updates: usize,
}

/// Renderer that records messages instead of drawing them.
///
/// Clones share the same message list, so a test can keep one clone while
/// the session controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    messages: Arc<Mutex<Vec<RenderedMessage>>>,
    input_clears: Arc<Mutex<usize>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages in append order.
    pub fn messages(&self) -> Vec<RenderedMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Snapshot of the message at `index`.
    pub fn message(&self, index: usize) -> Option<RenderedMessage> {
        self.messages.lock().unwrap().get(index).cloned()
    }

    /// The most recently appended bot message.
    pub fn last_bot_message(&self) -> Option<RenderedMessage> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|message| message.sender == Sender::Bot)
            .cloned()
    }

    /// How many times the input was cleared.
    pub fn input_clears(&self) -> usize {
        *self.input_clears.lock().unwrap()
    }
}

impl Renderer for RecordingRenderer {
    type Handle = RecordedMessageHandle;

    fn append_message(
        &mut self,
        text: &str,
        sender: Sender,
        is_placeholder: bool,
        is_error: bool,
    ) -> Self::Handle {
        let mut messages = self.messages.lock().unwrap();
        messages.push(RenderedMessage {
            sender,
            text: text.to_string(),
            placeholder: sender == Sender::Bot && is_placeholder && !is_error,
            error: is_error,
            updates: 0,
        });

        RecordedMessageHandle {
            index: messages.len() - 1,
            messages: Arc::clone(&self.messages),
        }
    }

    fn clear_input(&mut self) {
        *self.input_clears.lock().unwrap() += 1;
    }
}

/// Handle to a message held by a [`RecordingRenderer`].
#[derive(Debug)]
pub struct RecordedMessageHandle {
    index: usize,
    messages: Arc<Mutex<Vec<RenderedMessage>>>,
}

impl RecordedMessageHandle {
    fn update(&self, f: impl FnOnce(&mut RenderedMessage)) {
        if let Some(message) = self.messages.lock().unwrap().get_mut(self.index) {
            f(message);
        }
    }
}

impl MessageHandle for RecordedMessageHandle {
    fn set_text(&mut self, text: &str) {
        self.update(|message| {
            message.text = text.to_string();
            message.updates += 1;
        });
    }

    fn clear_placeholder(&mut self) {
        self.update(|message| message.placeholder = false);
    }

    fn mark_error(&mut self) {
        self.update(|message| {
            message.error = true;
            message.placeholder = false;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_update() {
        let mut renderer = RecordingRenderer::new();
        let observer = renderer.clone();

        renderer.append_message("hi", Sender::User, false, false);
        let mut bot = renderer.append_message("", Sender::Bot, true, false);

        assert_eq!(observer.messages().len(), 2);
        assert!(observer.message(1).unwrap().placeholder);

        bot.clear_placeholder();
        bot.set_text("Hello");

        let message = observer.last_bot_message().unwrap();
        assert_eq!(message.text, "Hello");
        assert!(!message.placeholder);
        assert_eq!(message.updates, 1);
    }

    #[test]
    fn test_mark_error_clears_placeholder() {
        let mut renderer = RecordingRenderer::new();
        let mut bot = renderer.append_message("", Sender::Bot, true, false);
        bot.mark_error();

        let message = renderer.message(0).unwrap();
        assert!(message.error);
        assert!(!message.placeholder);
    }

    #[test]
    fn test_clear_input_is_counted() {
        let mut renderer = RecordingRenderer::new();
        renderer.clear_input();
        renderer.clear_input();
        assert_eq!(renderer.input_clears(), 2);
    }
}
