//! Per-site failure data carried inside an overview.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Why a single site could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// The site's provider type has no registered reader.
    UnsupportedServiceType,
    /// The request never produced a usable response.
    RequestFailed,
    /// The response did not match the provider's schema.
    DecodeFailed,
}

impl ErrorCode {
    /// Stable machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedServiceType => "UNSUPPORTED_SERVICE_TYPE",
            ErrorCode::RequestFailed => "UNABLE_TO_MAKE_CLIENT_REQUEST",
            ErrorCode::DecodeFailed => "UNABLE_TO_PARSE_CLIENT_RESPONSE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared handle to the underlying cause of a failure.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// A recorded failure: a code, a human-readable message and the cause.
#[derive(Debug, Clone)]
pub struct StatusError {
    pub code: ErrorCode,
    pub message: String,
    pub cause: Option<Cause>,
}

impl StatusError {
    /// Create an error without an underlying cause.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for StatusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
