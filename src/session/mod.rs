//! Conversation state and the lifecycle of streamed replies.
//!
//! - [`Exchange`]: one user message and its bot reply
//! - [`StreamHandle`]: the read loop feeding one exchange
//! - [`SessionController`]: submission, superseding and update application

mod controller;
mod exchange;
mod handle;

pub use controller::SessionController;
pub use exchange::{Exchange, ExchangeStatus};
pub use handle::{StreamHandle, StreamPayload, StreamUpdate};
