//! Unified error types and result handling.
//!
//! Every failure the client can observe funnels into [`Error`]: configuration
//! problems, client-side validation, server-reported failures, and transport
//! failures. Screens catch these and turn them into user-facing messages; the
//! CLI only decides the exit code.

use crate::core::validation::FieldErrors;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description of the problem
        message: String,
    },

    /// Form input was rejected before any request was issued
    #[error("Validasi gagal: {0}")]
    Validation(FieldErrors),

    /// The server answered with a failure (non-2xx, or `success: false`)
    #[error("{message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Message reported by the server, or a synthesized `HTTP {status}` line
        message: String,
        /// Machine-readable error code, when the server sends one
        code: Option<String>,
    },

    /// The request did not complete within the configured timeout
    #[error("Request timeout - server tidak merespon. Coba refresh lagi.")]
    Timeout,

    /// Connection refused, DNS failure, TLS failure, or an undecodable body
    #[error("Network request failed: {0}")]
    Http(reqwest::Error),

    /// JSON encoding or decoding failed outside of reqwest
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned no record for the requested key
    #[error("Data {resource} '{key}' tidak ditemukan")]
    NotFound {
        /// Resource label, e.g. `barang`
        resource: &'static str,
        /// Key that was looked up
        key: String,
    },

    /// Invalid base URL or path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable was present but not valid unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(value)
        }
    }
}

impl Error {
    /// Returns the message the server reported, if this error came from the server.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// True for failures that never reached (or never heard back from) the server.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout | Self::Http(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
