//! Client configuration.
//!
//! Values come from defaults, then the environment, then command-line
//! flags, each layer overriding the previous one.

use std::time::Duration;

use crate::error::{ChatError, ChatResult};

/// Default chat endpoint of the local model server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/chat_stream";

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default tracing filter. Logs go to stderr and stay quiet unless asked.
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub const ENV_ENDPOINT: &str = "STREAMCHAT_URL";
pub const ENV_CONNECT_TIMEOUT: &str = "STREAMCHAT_CONNECT_TIMEOUT_SECS";
pub const ENV_LOG: &str = "STREAMCHAT_LOG";

/// Configuration for the chat client.
///
/// # Example
///
/// ```
/// use streamchat::config::ClientConfig;
///
/// let config = ClientConfig::default().with_endpoint("http://127.0.0.1:8000/chat_stream");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL the chat request is POSTed to
    pub endpoint: String,
    /// Limit for establishing the connection. Reading the body is unbounded.
    pub connect_timeout: Duration,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the log filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Create config from defaults overridden by environment variables.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }

        if let Ok(secs) = std::env::var(ENV_CONNECT_TIMEOUT) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.connect_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %secs, "Ignoring invalid {}", ENV_CONNECT_TIMEOUT),
            }
        }

        if let Ok(filter) = std::env::var(ENV_LOG) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }

    /// Check that the endpoint is an absolute http(s) URL.
    pub fn validate(&self) -> ChatResult<()> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| ChatError::Config(format!("invalid endpoint '{}': {}", self.endpoint, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ChatError::Config(format!(
                "unsupported endpoint scheme '{}'",
                scheme
            ))),
        }
    }
}
