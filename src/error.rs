use thiserror::Error;

/// Errors raised by the Bil24 API client and domain models.
///
/// HTTP status classification is deterministic: 401 and 403 get their own
/// variants, 404 is not-found, anything >= 500 is a server error, and the
/// remaining 4xx codes fall through to [`Bil24Error::Api`]. Each of those
/// variants carries the upstream status code and whatever human-readable
/// message the response body contained.
#[derive(Error, Debug)]
pub enum Bil24Error {
    #[error("API credentials are not configured: {0}")]
    Config(String),

    #[error("Network request failed: {message}")]
    Network { message: String, timeout: bool },

    #[error("Empty response from API (HTTP {status})")]
    EmptyResponse { status: u16 },

    #[error("Invalid JSON response: {message}")]
    InvalidJson { message: String },

    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Access denied (HTTP {status}): {message}")]
    Authorization { status: u16, message: String },

    #[error("Resource not found (HTTP {status}): {message}")]
    NotFound { status: u16, message: String },

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Bil24Error {
    /// Whether this error was caused by the transport timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Bil24Error::Network { timeout: true, .. })
    }

    /// Upstream HTTP status code, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Bil24Error::EmptyResponse { status }
            | Bil24Error::Authentication { status, .. }
            | Bil24Error::Authorization { status, .. }
            | Bil24Error::NotFound { status, .. }
            | Bil24Error::Server { status, .. }
            | Bil24Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Bil24Error>;
