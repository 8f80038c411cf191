//! Unified terminal error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl TerminalError {
    /// Configuration errors need operator action; everything else may clear
    /// up on the next refresh.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TerminalError::Config(_))
    }
}

/// Operator-side misconfiguration. Not fixed by retrying.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CMC_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures talking to the listings endpoint.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Response has no data array{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    MissingData(Option<String>),

    /// Another caller's fetch for the same key failed while this one waited.
    #[error("{0}")]
    Coalesced(String),
}
