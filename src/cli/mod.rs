//! CLI module for streamchat.
//!
//! Argument parsing happens before any runtime or terminal setup:
//!
//! ```ignore
//! use streamchat::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => println!("streamchat {}", VERSION),
//!     CliCommand::Run(options) => run(options),
//!     // ...
//! }
//! ```

pub mod args;

pub use args::{parse_args, usage, CliCommand, RunOptions};

/// Crate version, printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
