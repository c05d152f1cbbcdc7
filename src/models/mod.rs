//! Wire types exchanged with the chat endpoint.

mod request;
mod response;

pub use request::ChatRequest;
pub use response::ErrorBody;
