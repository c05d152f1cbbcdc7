//! Line-oriented terminal renderer.
//!
//! Prints each message on its own line and streams token updates in place.
//! Only the message that owns the current line is updated incrementally; if
//! an older message is updated after a newer one was printed, it is printed
//! again on a fresh line.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crossterm::cursor::MoveLeft;
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use tracing::warn;

use crate::traits::{MessageHandle, Renderer, Sender};

const PLACEHOLDER: &str = "…";

struct TerminalState<W> {
    out: W,
    /// The cursor is at the end of a message line
    line_open: bool,
    /// Message that owns the current line
    active: Option<u64>,
    next_id: u64,
}

impl<W: Write> TerminalState<W> {
    fn start_line(&mut self, id: u64, sender: Sender) -> io::Result<()> {
        if self.line_open {
            queue!(self.out, Print("\n"))?;
        }
        match sender {
            Sender::User => queue!(self.out, PrintStyledContent("you> ".bold()))?,
            Sender::Bot => queue!(self.out, PrintStyledContent("bot> ".bold().cyan()))?,
        }
        self.line_open = true;
        self.active = Some(id);
        Ok(())
    }

    fn print_text(&mut self, text: &str, error: bool) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if error {
            queue!(self.out, PrintStyledContent(text.red()))
        } else {
            queue!(self.out, Print(text))
        }
    }

    fn erase_placeholder(&mut self) -> io::Result<()> {
        queue!(self.out, MoveLeft(1), Clear(ClearType::UntilNewLine))
    }
}

/// Renderer writing to a terminal (or any `Write`).
pub struct TerminalRenderer<W: Write> {
    state: Arc<Mutex<TerminalState<W>>>,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Arc::new(Mutex::new(TerminalState {
                out,
                line_open: false,
                active: None,
                next_id: 0,
            })),
        }
    }

    /// Terminate the current line, if any.
    pub fn finish_line(&self) {
        let mut state = lock(&self.state);
        if state.line_open {
            state.line_open = false;
            state.active = None;
            report(queue!(state.out, Print("\n")));
            report(state.out.flush());
        }
    }
}

impl TerminalRenderer<Vec<u8>> {
    /// Everything written so far, for tests.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.state).out).into_owned()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Handle = TerminalMessageHandle<W>;

    fn append_message(
        &mut self,
        text: &str,
        sender: Sender,
        is_placeholder: bool,
        is_error: bool,
    ) -> Self::Handle {
        let mut state = lock(&self.state);
        let id = state.next_id;
        state.next_id += 1;

        let placeholder = sender == Sender::Bot && is_placeholder && !is_error;
        report(state.start_line(id, sender));
        report(state.print_text(text, is_error));
        if placeholder {
            report(queue!(state.out, PrintStyledContent(PLACEHOLDER.dark_grey())));
        }
        report(state.out.flush());

        TerminalMessageHandle {
            id,
            sender,
            state: Arc::clone(&self.state),
            shown: text.to_string(),
            placeholder,
            error: is_error,
        }
    }
}

/// Handle to a message printed by a [`TerminalRenderer`].
pub struct TerminalMessageHandle<W: Write> {
    id: u64,
    sender: Sender,
    state: Arc<Mutex<TerminalState<W>>>,
    /// Text currently printed for this message
    shown: String,
    placeholder: bool,
    error: bool,
}

impl<W: Write> MessageHandle for TerminalMessageHandle<W> {
    fn set_text(&mut self, text: &str) {
        let mut state = lock(&self.state);

        if state.active != Some(self.id) {
            // Another message owns the line: print this one again in full
            report(state.start_line(self.id, self.sender));
            report(state.print_text(text, self.error));
            self.placeholder = false;
        } else {
            if self.placeholder {
                report(state.erase_placeholder());
                self.placeholder = false;
            }
            match text.strip_prefix(self.shown.as_str()) {
                Some(suffix) => report(state.print_text(suffix, self.error)),
                None => {
                    report(queue!(state.out, Print("\r"), Clear(ClearType::CurrentLine)));
                    state.line_open = false;
                    report(state.start_line(self.id, self.sender));
                    report(state.print_text(text, self.error));
                }
            }
        }

        self.shown = text.to_string();
        report(state.out.flush());
    }

    fn clear_placeholder(&mut self) {
        if !self.placeholder {
            return;
        }
        self.placeholder = false;

        let mut state = lock(&self.state);
        if state.active == Some(self.id) {
            report(state.erase_placeholder());
            report(state.out.flush());
        }
    }

    fn mark_error(&mut self) {
        self.error = true;
        self.clear_placeholder();
    }
}

fn lock<W>(state: &Mutex<TerminalState<W>>) -> MutexGuard<'_, TerminalState<W>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        warn!(error = %err, "Terminal write failed");
    }
}
