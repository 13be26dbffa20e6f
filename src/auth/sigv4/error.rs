//! Errors raised while signing a request.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::auth::credentials::CredentialsError;

/// Error returned when a request cannot be signed.
///
/// Signing failures happen before any network activity and are never
/// retried.
///
/// # Example
///
/// ```rust
/// use iam_signed::auth::sigv4::SigningError;
/// use iam_signed::auth::CredentialsError;
///
/// let error: SigningError = CredentialsError::Empty.into();
/// assert!(error.to_string().starts_with("failed to sign the request"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The credential provider could not supply credentials.
    #[error("failed to sign the request: {0}")]
    Credentials(#[from] CredentialsError),

    /// The resolved credentials expired before the signing time.
    #[error("failed to sign the request: credentials expired at {expired_at}")]
    ExpiredCredentials {
        /// When the credentials stopped being valid.
        expired_at: DateTime<Utc>,
    },

    /// A header that takes part in the signature is not a valid header value.
    #[error("failed to sign the request: header '{name}' is not a valid header value")]
    InvalidHeaderValue {
        /// The offending header name.
        name: String,
    },
}
