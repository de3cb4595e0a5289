//! Error taxonomy for scanview.
//!
//! Three layers, composed with `thiserror` and `From` conversions so `?`
//! propagates cleanly:
//!
//! - [`TransportError`] - one failed search request (network, HTTP status,
//!   or response decode). Non-fatal: surfaced in the UI while the last
//!   successfully displayed page is retained.
//! - [`IntentError`] - a UI intent rejected locally before any request is
//!   made (page out of range, unknown field). Never reaches the transport.
//! - [`AppError`] - top-level wrapper returned from startup and the main
//!   loop. Config, logging, and terminal failures are fatal.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or parsed. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized. Fatal at startup.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A search request failed. Non-fatal; scoped to one fetch.
    #[error("Search request failed: {0}")]
    Transport(#[from] TransportError),

    /// Terminal or TUI rendering error. Fatal - without a working terminal
    /// the dashboard cannot run.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of a single search request.
///
/// The transport never retries; every variant is scoped to the one
/// outstanding fetch it came from, and the controller keeps the previously
/// displayed data when one arrives.
///
/// Variants carry plain data (no wrapped client errors) so completions can be
/// cloned through channels and compared in tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, DNS, or timeout failure before an HTTP response arrived.
    #[error("Network error: {message}")]
    Network {
        /// Description of the underlying client failure.
        message: String,
    },

    /// Server answered with a non-2xx status.
    #[error("API error: HTTP {status}")]
    HttpStatus {
        /// The HTTP status code received.
        status: u16,
    },

    /// Response body did not match the expected result envelope.
    #[error("Invalid response body: {message}")]
    Decode {
        /// What was wrong with the body.
        message: String,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::HttpStatus {
                status: status.as_u16(),
            },
            None => TransportError::Network {
                message: err.to_string(),
            },
        }
    }
}

/// A UI intent rejected before reaching the transport.
///
/// These are caller errors: the intent is dropped with no state change, no
/// token bump, and no request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentError {
    /// Requested page is outside `[1, total_pages]` for the last known total.
    #[error("Page {requested} out of range (1..={total_pages})")]
    PageOutOfRange {
        /// The 1-indexed page that was requested.
        requested: u32,
        /// Number of pages given the last known total.
        total_pages: u32,
    },

    /// A filter or sort clause names an attribute the resource does not have.
    #[error("Unknown queryable field '{field}' for resource '{resource}'")]
    UnknownField {
        /// The offending field name.
        field: String,
        /// The resource the clause was aimed at.
        resource: &'static str,
    },
}
