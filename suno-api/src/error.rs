//! Error types for the Suno API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Suno API.
#[derive(Debug, Error)]
pub enum SunoError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity endpoint did not return a usable session id.
    ///
    /// Almost always means the cookie is expired or was copied incompletely.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// An authenticated call was made before a session id and token exist.
    #[error("client not initialized: no session established")]
    NotInitialized,

    /// A generation-side endpoint answered with a non-2xx status.
    #[error("request failed ({status}): {message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Canonical status text, e.g. `Payment Required`.
        message: String,
    },

    /// File I/O error (credential or config read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file or a `SUNO_*` override could not be read.
    #[error("config error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Catch-all for other errors (e.g. missing config directory).
    #[error("{0}")]
    Other(String),
}

impl SunoError {
    /// Whether this is a transport timeout, including one cut short by a
    /// polling deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Build a [`SunoError::Request`] from a response status.
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Request {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_owned(),
        }
    }
}

/// Convenience alias for `Result<T, SunoError>`.
pub type Result<T> = std::result::Result<T, SunoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_carries_status_text() {
        let err = SunoError::from_status(reqwest::StatusCode::PAYMENT_REQUIRED);
        assert!(matches!(err, SunoError::Request { status: 402, .. }));
        assert_eq!(err.to_string(), "request failed (402): Payment Required");
    }

    #[test]
    fn only_transport_errors_count_as_timeouts() {
        let gateway_timeout = SunoError::from_status(reqwest::StatusCode::GATEWAY_TIMEOUT);
        assert!(!gateway_timeout.is_timeout());
        assert!(!SunoError::NotInitialized.is_timeout());
    }
}
