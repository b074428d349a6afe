//! Framework error type.
//!
//! [`HermesError`] is the error every action and middleware unit may
//! raise. Each variant maps to an HTTP status code, and
//! [`HermesError::to_response`] renders the error for the wire: full
//! detail in development mode, a generic message otherwise.

use http::StatusCode;
use thiserror::Error;

use crate::Response;

/// Result type alias using [`HermesError`].
pub type HermesResult<T> = Result<T, HermesError>;

/// Standard error type for Hermes actions and middleware units.
///
/// # Example
///
/// ```
/// use hermes_core::HermesError;
/// use http::StatusCode;
///
/// let err = HermesError::not_found("no such user");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Error, Debug)]
pub enum HermesError {
    /// The request was malformed.
    #[error("bad request: {message}")]
    BadRequest {
        /// Human-readable error message.
        message: String,
    },

    /// The caller is not allowed to perform the request.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Human-readable error message.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// The request exceeded a host-imposed deadline.
    #[error("timeout: {message}")]
    Timeout {
        /// Human-readable error message.
        message: String,
    },

    /// An internal failure inside an action or unit.
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error (not exposed to clients outside dev mode).
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl HermesError {
    /// Creates a bad-request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with an underlying cause.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders this error as a response.
    ///
    /// With `dev_mode` set the body carries the full error text including
    /// the source chain; otherwise only the status line's canonical reason
    /// is exposed.
    #[must_use]
    pub fn to_response(&self, dev_mode: bool) -> Response {
        let status = self.status_code();
        let body = if dev_mode {
            self.detail()
        } else {
            status.canonical_reason().unwrap_or("error").to_string()
        };
        Response::text(status, body)
    }

    /// Returns the full error text including the source chain.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Internal {
                source: Some(source),
                ..
            } => format!("{self}: {source:#}"),
            _ => self.to_string(),
        }
    }
}
