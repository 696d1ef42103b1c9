//! Error type shared by every auth client operation.

use thiserror::Error;

/// Errors returned by [`AuthClient`](crate::AuthClient) and its helpers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The client configuration is incomplete or malformed.
    #[error("auth is not configured: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The email address was rejected before any request was made.
    #[error("invalid email address")]
    InvalidEmail,

    /// Network-level failure (DNS, connection refused, TLS, CORS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The auth API answered with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("failed to decode response: {0}")]
    Deserialization(String),

    /// Reading or writing the persisted session failed.
    #[error("session storage error: {0}")]
    Storage(String),

    /// A browser API (location, history) was unavailable or threw.
    #[error("browser error: {0}")]
    Browser(String),
}

impl AuthError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API rejected the current credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
