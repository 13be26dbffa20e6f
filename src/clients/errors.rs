//! Delivery error types.
//!
//! This module contains the errors raised while building, signing and
//! sending a request.
//!
//! # Error Handling
//!
//! - [`InvalidHttpRequestError`]: The request could not be constructed
//! - [`SigningError`]: The request could not be signed
//! - [`TransportError`]: The network call failed or was cancelled
//! - [`UnexpectedStatusError`]: The endpoint answered with a status other than 200
//! - [`HttpError`]: Unified error type encompassing all of the above
//!
//! Every error is terminal for its call. Nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use iam_signed::{api_gateway, HttpError};
//!
//! match api_gateway(payload, endpoint, "us-east-1", "GET", &creds).await {
//!     Ok(body) => println!("{}", String::from_utf8_lossy(&body)),
//!     Err(HttpError::UnexpectedStatus(e)) => println!("status {}", e.code),
//!     Err(HttpError::Transport(e)) if e.is_cancelled() => println!("cancelled"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::sigv4::SigningError;
use crate::error::ConfigError;

/// Error returned when a request fails validation before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not a recognized verb.
    #[error("could not create request: invalid HTTP method '{method}'")]
    InvalidMethod {
        /// The method that was provided.
        method: String,
    },

    /// The endpoint is not an absolute `http`/`https` URL.
    #[error("could not create request: invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint that was provided.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An extra header name or value is not valid HTTP.
    #[error("could not create request: invalid header '{name}'")]
    InvalidHeader {
        /// The header name that was provided.
        name: String,
    },
}

/// Error returned when the network round trip fails.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS, TLS, timeout or body read failure.
    #[error("could not send request: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the response was complete.
    #[error("could not send request: operation cancelled")]
    Cancelled,
}

impl TransportError {
    /// Returns `true` if the call was aborted by its cancellation token.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the underlying client hit its configured timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}

/// Error returned when the endpoint answers with any status other than 200.
///
/// The check is strict equality: 201, 204 and redirects are failures too.
///
/// # Example
///
/// ```rust
/// use iam_signed::clients::UnexpectedStatusError;
///
/// let error = UnexpectedStatusError {
///     code: 403,
///     request_id: Some("abc-123".to_string()),
///     error_type: Some("UnauthorizedException".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "received status code 403 (UnauthorizedException, request id abc-123)");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("received status code {code}{}", describe_reference(.error_type.as_deref(), .request_id.as_deref()))]
pub struct UnexpectedStatusError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Request id reported by AWS (`x-amzn-RequestId`), if present.
    pub request_id: Option<String>,
    /// Error type reported by AWS (`x-amzn-ErrorType`), if present.
    pub error_type: Option<String>,
}

fn describe_reference(error_type: Option<&str>, request_id: Option<&str>) -> String {
    match (error_type, request_id) {
        (Some(kind), Some(id)) => format!(" ({kind}, request id {id})"),
        (Some(kind), None) => format!(" ({kind})"),
        (None, Some(id)) => format!(" (request id {id})"),
        (None, None) => String::new(),
    }
}

/// Unified error type for building, signing and delivering a request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be constructed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A configuration value (region, client settings) was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The network call failed or was cancelled.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The endpoint answered with a status other than 200.
    #[error(transparent)]
    UnexpectedStatus(#[from] UnexpectedStatusError),
}

impl HttpError {
    /// Returns the status code if the endpoint answered with a non-200 status.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns `true` if the call was aborted by its cancellation token.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(TransportError::Network(error))
    }
}
