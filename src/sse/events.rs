//! Frame and event types for the chat event stream.
//!
//! The wire protocol is a sequence of records separated by `"\n\n"`:
//! - `data:<payload>` - an incremental text token
//! - `event: end` - logical end of generation
//! - `event: error\ndata:{"error": "<message>"}` - generation failed

/// Separator between two records on the wire.
pub const RECORD_SEPARATOR: &str = "\n\n";

/// Message used when an `event: error` payload cannot be parsed.
pub const FALLBACK_ERROR_MESSAGE: &str = "model generation error";

/// One classified record of the wire protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// `data:` record with the payload after the whitespace policy
    Data(String),
    /// `event: end` record
    End,
    /// `event: error` record with the extracted message
    Error { message: String },
    /// Anything else; ignored for forward compatibility
    Unknown,
}

impl Frame {
    /// Convert a frame into the event delivered to consumers.
    ///
    /// `Unknown` frames produce no event.
    pub fn into_event(self) -> Option<StreamEvent> {
        match self {
            Frame::Data(text) => Some(StreamEvent::Data { text }),
            Frame::End => Some(StreamEvent::End),
            Frame::Error { message } => Some(StreamEvent::Error { message }),
            Frame::Unknown => None,
        }
    }
}

/// Typed events produced while consuming one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text token; may be empty
    Data { text: String },
    /// The server finished generating
    End,
    /// The server reported a failure; no events follow
    Error { message: String },
    /// The transport reached the end of the body; always the last event
    /// unless an `Error` ended the stream first
    Closed,
}

impl StreamEvent {
    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Error { .. } | StreamEvent::Closed)
    }

    /// Event name used in log fields.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::Data { .. } => "data",
            StreamEvent::End => "end",
            StreamEvent::Error { .. } => "error",
            StreamEvent::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_into_event() {
        assert_eq!(
            Frame::Data("hi".to_string()).into_event(),
            Some(StreamEvent::Data {
                text: "hi".to_string()
            })
        );
        assert_eq!(Frame::End.into_event(), Some(StreamEvent::End));
        assert_eq!(Frame::Unknown.into_event(), None);
    }

    #[test]
    fn test_terminal_events() {
        assert!(StreamEvent::Closed.is_terminal());
        assert!(StreamEvent::Error {
            message: "x".to_string()
        }
        .is_terminal());
        assert!(!StreamEvent::End.is_terminal());
        assert!(!StreamEvent::Data {
            text: String::new()
        }
        .is_terminal());
    }

    #[test]
    fn test_event_type_name() {
        assert_eq!(StreamEvent::End.event_type_name(), "end");
        assert_eq!(StreamEvent::Closed.event_type_name(), "closed");
    }
}
