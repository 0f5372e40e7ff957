//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Token and account failures carry the HTTP status so the renderer can
/// surface it ("Too many requests" for 429). Per-account payment and
/// transaction failures use the same type but are logged and swallowed
/// by the aggregation stages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Too many requests (HTTP 429)")]
    RateLimited,

    #[error("Bank API error: HTTP {0}")]
    Http(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl Error {
    /// Create an error from a non-200 HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            other => Self::Http(other),
        }
    }

    /// The HTTP status carried by this error, if any
    pub fn response_code(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Http(status) => Some(*status),
            _ => None,
        }
    }

    /// User-facing message for the rendered error line
    pub fn display_message(&self) -> String {
        match self {
            Self::RateLimited => "Too many requests".to_string(),
            Self::Http(status) => format!("An error occured ({})", status),
            Self::Transport(_) => "An error occured (no response)".to_string(),
            other => format!("An error occured ({})", other),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
