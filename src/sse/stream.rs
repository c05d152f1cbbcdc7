//! Adapting a response byte stream into a stream of events.

use std::collections::VecDeque;
use std::pin::Pin;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::debug;

use crate::error::TransportError;
use crate::sse::events::StreamEvent;
use crate::sse::parser::FrameParser;
use crate::traits::ByteStream;

/// Lazy, ordered stream of events for one response body.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, TransportError>> + Send>>;

struct DecodeState {
    bytes: ByteStream,
    parser: FrameParser,
    ready: VecDeque<StreamEvent>,
    done: bool,
}

/// Turn a chunked response body into events.
///
/// The stream ends after [`StreamEvent::Closed`], after an
/// [`StreamEvent::Error`], or after the first transport error.
pub fn decode_events(bytes: ByteStream) -> EventStream {
    let state = DecodeState {
        bytes,
        parser: FrameParser::new(),
        ready: VecDeque::new(),
        done: false,
    };

    let events = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((Ok(event), state));
            }

            if state.done {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    state.ready.extend(state.parser.feed(&chunk));
                    if state.parser.is_terminated() {
                        debug!("Error record received, no longer reading body");
                        state.done = true;
                    }
                }
                Some(Err(err)) => {
                    debug!(error = %err, "Body read failed");
                    state.done = true;
                    state.ready.clear();
                    return Some((Err(err), state));
                }
                None => {
                    state.ready.extend(state.parser.finish());
                    state.done = true;
                }
            }
        }
    });

    Box::pin(events)
}
