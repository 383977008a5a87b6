//! Client error type.

use thiserror::Error;

/// Failures talking to the directory API or writing its output.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, when present.
        message: Option<String>,
    },
    /// A success response did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The configured API URL cannot address endpoints.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
    /// A local file could not be written.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Message supplied by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a notice: the server's message, else `fallback`.
    #[must_use]
    pub fn notice_text(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}
