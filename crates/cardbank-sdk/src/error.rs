//! SDK error taxonomy
//!
//! - [`SdkError::Api`]: the service answered with a non-success status
//! - [`SdkError::Network`]: no usable response (unreachable, timeout, ...)
//! - [`SdkError::Decode`]: a success response whose body didn't parse
//! - [`SdkError::Config`]: the client could not be built

use thiserror::Error;

/// SDK Result type
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// SDK-specific errors
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SdkError {
    /// Message the server put in its error payload, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// HTTP status of an error response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
