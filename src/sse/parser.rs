//! Record framing and classification.
//!
//! [`FrameParser`] owns the decoder and the text buffer for one response
//! body. Bytes go in through [`FrameParser::feed`]; every record completed by
//! a `"\n\n"` separator comes out as a [`StreamEvent`], in wire order.

use tracing::{debug, trace, warn};

use crate::error::{ChatError, ChatResult};
use crate::models::ErrorBody;
use crate::sse::decoder::Utf8StreamDecoder;
use crate::sse::events::{Frame, StreamEvent, FALLBACK_ERROR_MESSAGE, RECORD_SEPARATOR};

const END_PREFIX: &str = "event: end";
const ERROR_PREFIX: &str = "event: error";
const DATA_PREFIX: &str = "data:";

/// Classify one complete record (separator already removed).
pub fn classify_frame(raw: &str) -> Frame {
    if raw.starts_with(END_PREFIX) {
        return Frame::End;
    }

    if raw.starts_with(ERROR_PREFIX) {
        let message = parse_error_frame(raw).unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to generic error message");
            FALLBACK_ERROR_MESSAGE.to_string()
        });
        return Frame::Error { message };
    }

    if let Some(payload) = raw.strip_prefix(DATA_PREFIX) {
        return Frame::Data(data_payload(payload).to_string());
    }

    trace!(record = raw, "Ignoring unrecognized record");
    Frame::Unknown
}

/// Apply the payload whitespace policy.
///
/// Exactly one space after `data:` belongs to the field syntax and is
/// removed. Any other leading or trailing whitespace is part of the token.
fn data_payload(payload: &str) -> &str {
    payload.strip_prefix(' ').unwrap_or(payload)
}

/// Extract the message from an `event: error` record.
///
/// The JSON object spans from the first `{` to the last `}` of the record.
pub fn parse_error_frame(raw: &str) -> ChatResult<String> {
    let protocol_error = |detail: String| ChatError::Protocol {
        event: "error".to_string(),
        detail,
    };

    let json = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => return Err(protocol_error("no JSON object in error record".to_string())),
    };

    let body: ErrorBody =
        serde_json::from_str(json).map_err(|err| protocol_error(err.to_string()))?;

    body.error
        .filter(|message| !message.is_empty())
        .ok_or_else(|| protocol_error("missing error field".to_string()))
}

/// Stateful parser for one response body.
#[derive(Debug, Default)]
pub struct FrameParser {
    decoder: Utf8StreamDecoder,
    /// Decoded text not yet terminated by a separator
    buffer: String,
    /// An error record was emitted; everything after it is discarded
    terminated: bool,
    /// `finish` was called
    finished: bool,
    /// Number of events emitted so far
    emitted: usize,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of the body, returning the events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        if self.terminated || self.finished {
            trace!(bytes = chunk.len(), "Discarding chunk after end of stream");
            return Vec::new();
        }

        let text = self.decoder.decode(chunk);
        self.buffer.push_str(&text);

        let mut events = Vec::new();
        self.drain_complete_frames(&mut events);
        events
    }

    /// Handle transport completion.
    ///
    /// Flushes the decoder once, classifies the remaining buffer once, and
    /// ends with [`StreamEvent::Closed`] unless an error record came first.
    /// Calling it again returns nothing.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;

        let mut events = Vec::new();
        if self.terminated {
            return events;
        }

        let tail = self.decoder.finish();
        self.buffer.push_str(&tail);

        let rest = std::mem::take(&mut self.buffer);
        if !rest.is_empty() {
            if let Some(event) = classify_frame(&rest).into_event() {
                self.push_event(event, &mut events);
            }
        }

        if !self.terminated {
            self.push_event(StreamEvent::Closed, &mut events);
        }

        debug!(events = self.emitted, "Response body finished");
        events
    }

    /// Whether an error record ended the stream.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Bytes of text waiting for a separator.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    fn drain_complete_frames(&mut self, events: &mut Vec<StreamEvent>) {
        let mut consumed = 0;

        while let Some(offset) = self.buffer[consumed..].find(RECORD_SEPARATOR) {
            let end = consumed + offset;
            let frame = classify_frame(&self.buffer[consumed..end]);
            consumed = end + RECORD_SEPARATOR.len();

            if let Some(event) = frame.into_event() {
                let terminal = event.is_terminal();
                events.push(event);
                self.emitted += 1;
                if terminal {
                    self.terminated = true;
                    break;
                }
            }
        }

        if self.terminated {
            self.buffer.clear();
        } else {
            self.buffer.drain(..consumed);
        }
    }

    fn push_event(&mut self, event: StreamEvent, events: &mut Vec<StreamEvent>) {
        if matches!(event, StreamEvent::Error { .. }) {
            self.terminated = true;
        }
        events.push(event);
        self.emitted += 1;
    }
}
