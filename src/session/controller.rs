//! Session controller: one in-flight exchange at a time.
//!
//! The controller owns the renderer and the current [`StreamHandle`]. Read
//! loops run on their own tasks and report back through an unbounded
//! channel; the controller applies updates one at a time, so all exchange
//! and renderer mutation happens on the caller's task.
//!
//! Submitting while a reply is still streaming supersedes it: the old read
//! loop is cancelled and anything it already queued is dropped by the
//! generation check in [`SessionController::apply_update`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::exchange::Exchange;
use super::handle::{StreamHandle, StreamPayload, StreamUpdate};
use crate::config::ClientConfig;
use crate::error::ChatError;
use crate::models::ChatRequest;
use crate::sse::StreamEvent;
use crate::traits::{HttpClient, MessageHandle, Renderer, Sender};

/// The exchange being displayed plus its bot message.
struct ActiveExchange<H> {
    exchange: Exchange,
    bot: Option<H>,
    awaiting: bool,
}

impl<H: MessageHandle> ActiveExchange<H> {
    /// Drop the awaiting indicator if it is still shown.
    fn clear_awaiting(&mut self) {
        if !self.awaiting {
            return;
        }
        self.awaiting = false;
        if let Some(bot) = self.bot.as_mut() {
            bot.clear_placeholder();
        }
    }
}

pub struct SessionController<C, R>
where
    C: HttpClient + 'static,
    R: Renderer,
{
    client: Arc<C>,
    renderer: R,
    endpoint: String,
    updates_tx: mpsc::UnboundedSender<StreamUpdate>,
    updates_rx: mpsc::UnboundedReceiver<StreamUpdate>,
    next_generation: u64,
    active: Option<ActiveExchange<R::Handle>>,
    stream: Option<StreamHandle>,
}

impl<C, R> SessionController<C, R>
where
    C: HttpClient + 'static,
    R: Renderer,
{
    pub fn new(client: Arc<C>, renderer: R, config: &ClientConfig) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            client,
            renderer,
            endpoint: config.endpoint.clone(),
            updates_tx,
            updates_rx,
            next_generation: 0,
            active: None,
            stream: None,
        }
    }

    /// Submit a user message.
    ///
    /// Returns `false` and does nothing when the trimmed text is empty.
    /// Otherwise any in-flight reply is superseded, both messages are
    /// rendered, and the request is issued on a new read loop.
    pub fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            trace!("Ignoring empty submission");
            return false;
        }

        self.supersede();

        let mut exchange = Exchange::new(text);
        self.renderer.append_message(text, Sender::User, false, false);
        let bot = self.renderer.append_message("", Sender::Bot, true, false);
        self.renderer.clear_input();

        self.next_generation += 1;
        let generation = self.next_generation;
        info!(exchange = %exchange.id(), generation, "Submitting message");

        self.stream = Some(StreamHandle::open(
            generation,
            exchange.id(),
            Arc::clone(&self.client),
            self.endpoint.clone(),
            ChatRequest::new(text),
            self.updates_tx.clone(),
        ));
        exchange.begin_streaming();

        self.active = Some(ActiveExchange {
            exchange,
            bot: Some(bot),
            awaiting: true,
        });
        true
    }

    /// Wait for the next update from any read loop.
    ///
    /// Pending forever while nothing is streaming, which makes it safe to
    /// use as a `select!` branch.
    pub async fn next_update(&mut self) -> Option<StreamUpdate> {
        self.updates_rx.recv().await
    }

    /// Apply one update to the current exchange.
    ///
    /// Updates from any stream other than the current one are ignored.
    pub fn apply_update(&mut self, update: StreamUpdate) {
        let current = self.stream.as_ref().map(StreamHandle::generation);
        if current != Some(update.generation) {
            trace!(
                generation = update.generation,
                current = ?current,
                "Dropping update from stale stream"
            );
            return;
        }

        match update.payload {
            StreamPayload::Event(StreamEvent::Data { text }) => self.on_data(&text),
            StreamPayload::Event(StreamEvent::End) => {
                debug!("End of reply announced");
                if let Some(active) = self.active.as_mut() {
                    active.clear_awaiting();
                }
            }
            StreamPayload::Event(StreamEvent::Error { message }) => {
                self.fail(ChatError::ServerReported { message });
            }
            StreamPayload::Event(StreamEvent::Closed) => self.on_closed(),
            StreamPayload::Transport(err) => self.fail(err.into()),
        }
    }

    /// Apply updates until the current reply finishes.
    pub async fn run_until_idle(&mut self) {
        while self.stream.is_some() {
            match self.updates_rx.recv().await {
                Some(update) => self.apply_update(update),
                None => break,
            }
        }
    }

    /// Stop the in-flight reply, if any, keeping the text received so far.
    pub fn cancel(&mut self) {
        if self.stream.is_some() {
            info!("Cancelling in-flight reply");
        }
        self.supersede();
    }

    /// The most recently submitted exchange.
    pub fn exchange(&self) -> Option<&Exchange> {
        self.active.as_ref().map(|active| &active.exchange)
    }

    /// Whether a reply is still being read.
    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Generation of the in-flight stream.
    pub fn current_generation(&self) -> Option<u64> {
        self.stream.as_ref().map(StreamHandle::generation)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn supersede(&mut self) {
        if let Some(previous) = self.stream.take() {
            debug!(generation = previous.generation(), "Cancelling previous stream");
            previous.cancel();
        }
        if let Some(active) = self.active.as_mut() {
            active.clear_awaiting();
        }
    }

    fn on_data(&mut self, text: &str) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.clear_awaiting();
        if !active.exchange.append(text) {
            return;
        }
        if let Some(bot) = active.bot.as_mut() {
            bot.set_text(active.exchange.bot_text());
        }
    }

    fn on_closed(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.clear_awaiting();
            if active.exchange.complete() {
                info!(
                    exchange = %active.exchange.id(),
                    chars = active.exchange.bot_text().chars().count(),
                    elapsed_ms = active.exchange.elapsed_ms(),
                    "Reply complete"
                );
            }
        }
        self.stream = None;
    }

    fn fail(&mut self, err: ChatError) {
        warn!(code = err.error_code(), error = %err, "Reply failed");
        let annotation = err.user_message();

        match self.active.as_mut() {
            Some(active) => {
                active.clear_awaiting();
                if active.exchange.fail(&annotation) {
                    match active.bot.as_mut() {
                        Some(bot) => {
                            bot.mark_error();
                            bot.set_text(active.exchange.bot_text());
                        }
                        None => {
                            self.renderer
                                .append_message(&annotation, Sender::Bot, false, true);
                        }
                    }
                }
            }
            None => {
                self.renderer
                    .append_message(&annotation, Sender::Bot, false, true);
            }
        }

        self.stream = None;
    }
}
