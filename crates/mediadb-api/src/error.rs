//! Error type shared by all clients.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MediaError>;

/// Errors returned by the metadata clients and the filename parser.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum MediaError {
    /// No API key was given when building a client.
    #[error("API key not provided for {provider}")]
    MissingCredential {
        /// Provider name (`OMDb`, `TMDB`).
        provider: &'static str,
    },

    /// The query lacks the fields an operation needs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A date, title, or payload did not have the expected shape.
    #[error("parse failure: {0}")]
    ParseFailure(String),

    /// The HTTP layer or the upstream API rejected the request.
    #[error("transport failure: {message}")]
    Transport {
        /// Message from the transport or the upstream error body.
        message: String,
        /// Underlying HTTP client error, if any.
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl MediaError {
    /// Builds a `Transport` error without an underlying source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a `reqwest` error, prefixing it with what was being attempted.
    pub fn http(context: &str, err: reqwest::Error) -> Self {
        Self::Transport {
            message: format!("{context}: {err}"),
            source: Some(err),
        }
    }
}
