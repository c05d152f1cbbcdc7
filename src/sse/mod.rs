//! Consumer for the chat event stream.
//!
//! Turns a chunked HTTP response body into typed events:
//! - `decoder` - incremental UTF-8 decoding across chunk boundaries
//! - `events` - `Frame` classification and `StreamEvent` definitions
//! - `parser` - record framing on `"\n\n"` and classification
//! - `stream` - adapting a byte stream into an event stream

mod decoder;
mod events;
mod parser;
mod stream;

pub use decoder::Utf8StreamDecoder;
pub use events::{Frame, StreamEvent, FALLBACK_ERROR_MESSAGE, RECORD_SEPARATOR};
pub use parser::{classify_frame, parse_error_frame, FrameParser};
pub use stream::{decode_events, EventStream};
