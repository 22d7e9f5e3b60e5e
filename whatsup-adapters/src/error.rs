//! Error types for transports and readers.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport) while fetching a page.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No base URL is known for the site.
    #[error("unable to find {0} in the service list")]
    UnknownSite(String),

    /// The path could not be joined onto the site's base URL.
    #[error("invalid request path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Timeout waiting for response.
    #[error("request timed out")]
    Timeout,

    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-success status.
    #[error("status page returned HTTP {0}")]
    Status(u16),

    /// Any other HTTP client failure.
    #[error("HTTP request failed: {0}")]
    Http(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

/// Errors raised by a [`StatusReader`](crate::StatusReader).
///
/// Both variants keep the site name and the underlying cause.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The transport could not deliver a response.
    #[error("unable to make client request for {site}: {source}")]
    RequestFailed {
        site: String,
        #[source]
        source: TransportError,
    },

    /// The response did not match the provider's schema.
    #[error("unable to parse client response for {site}: {source}")]
    DecodeFailed {
        site: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AdapterError {
    /// Name of the site the failure belongs to.
    pub fn site(&self) -> &str {
        match self {
            AdapterError::RequestFailed { site, .. } | AdapterError::DecodeFailed { site, .. } => {
                site
            }
        }
    }
}
