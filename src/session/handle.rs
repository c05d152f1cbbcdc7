//! The live binding between an exchange and its response stream.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::error::TransportError;
use crate::models::ChatRequest;
use crate::sse::{decode_events, StreamEvent};
use crate::traits::{chat_request_headers, HttpClient};

/// What a read loop reports back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPayload {
    /// A parsed event
    Event(StreamEvent),
    /// Opening or reading the response failed
    Transport(TransportError),
}

/// A payload tagged with the generation of the stream that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamUpdate {
    pub generation: u64,
    pub payload: StreamPayload,
}

/// Owns the read loop of one response stream.
///
/// Cancelling (or dropping) the handle clears the liveness flag and aborts
/// the task, closing the connection.
#[derive(Debug)]
pub struct StreamHandle {
    generation: u64,
    live: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl StreamHandle {
    /// Issue the request and spawn the read loop.
    ///
    /// Must be called inside a tokio runtime.
    pub fn open<C>(
        generation: u64,
        exchange_id: Uuid,
        client: Arc<C>,
        url: String,
        request: ChatRequest,
        updates: mpsc::UnboundedSender<StreamUpdate>,
    ) -> Self
    where
        C: HttpClient + 'static,
    {
        let live = Arc::new(AtomicBool::new(true));
        let link = UpdateLink {
            generation,
            live: Arc::clone(&live),
            updates,
        };

        let span = info_span!("stream", generation, exchange = %exchange_id);
        let task = tokio::spawn(read_stream(client, url, request, link).instrument(span));

        Self {
            generation,
            live,
            task,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the read loop may still forward updates.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Stop the read loop. Updates already queued are still delivered and
    /// must be filtered by generation.
    pub fn cancel(&self) {
        self.live.store(false, Ordering::Release);
        self.task.abort();
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct UpdateLink {
    generation: u64,
    live: Arc<AtomicBool>,
    updates: mpsc::UnboundedSender<StreamUpdate>,
}

impl UpdateLink {
    /// Forward a payload if this stream is still current.
    fn forward(&self, payload: StreamPayload) -> bool {
        if !self.live.load(Ordering::Acquire) {
            return false;
        }
        self.updates
            .send(StreamUpdate {
                generation: self.generation,
                payload,
            })
            .is_ok()
    }
}

async fn read_stream<C: HttpClient>(
    client: Arc<C>,
    url: String,
    request: ChatRequest,
    link: UpdateLink,
) {
    let body = match request.to_body() {
        Ok(body) => body,
        Err(err) => {
            link.forward(StreamPayload::Transport(TransportError::InvalidRequest(
                err.to_string(),
            )));
            return;
        }
    };

    debug!(url = %url, "Opening chat stream");
    let bytes = match client.post_stream(&url, &body, &chat_request_headers()).await {
        Ok(bytes) => bytes,
        Err(err) => {
            link.forward(StreamPayload::Transport(err));
            return;
        }
    };

    let mut events = decode_events(bytes);
    while let Some(item) = events.next().await {
        let payload = match item {
            Ok(event) => StreamPayload::Event(event),
            Err(err) => StreamPayload::Transport(err),
        };
        if !link.forward(payload) {
            debug!("Stream no longer current, stopping read loop");
            return;
        }
    }

    debug!("Read loop finished");
}
