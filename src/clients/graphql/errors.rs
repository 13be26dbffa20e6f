//! GraphQL-specific error types.
//!
//! AppSync answers GraphQL-level failures with HTTP 200 and an `errors`
//! array in the body. Those are surfaced as [`GraphqlResponseError`], which
//! keeps whatever partial `data` the server returned.
//!
//! - [`GraphqlError::Http`]: Wraps building, signing and transport errors
//! - [`GraphqlError::Parse`]: The body was not a GraphQL envelope
//! - [`GraphqlError::Response`]: The envelope carried errors
//!
//! # Example
//!
//! ```rust,ignore
//! use iam_signed::{app_sync, GraphqlError};
//!
//! match app_sync(payload, endpoint, "us-east-1", &creds).await {
//!     Ok(data) => println!("{}", String::from_utf8_lossy(&data)),
//!     Err(GraphqlError::Response(e)) => {
//!         for entry in &e.errors {
//!             println!("{}", entry.message);
//!         }
//!     }
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::graphql::response::GraphqlErrorEntry;
use crate::clients::HttpError;

/// Longest body prefix kept in a [`ResponseParseError`].
pub const MAX_SNIPPET_BYTES: usize = 1024;

/// Error returned when a response body is not a GraphQL envelope.
#[derive(Debug, Error)]
#[error("could not parse response '{snippet}': {source}")]
pub struct ResponseParseError {
    /// The start of the raw body, lossily decoded.
    pub snippet: String,
    /// The underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

impl ResponseParseError {
    pub(crate) fn new(body: &[u8], source: serde_json::Error) -> Self {
        Self {
            snippet: snippet(body),
            source,
        }
    }
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_SNIPPET_BYTES {
        return text.into_owned();
    }
    let mut end = MAX_SNIPPET_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Error returned when a GraphQL response carries a non-empty `errors` array.
///
/// # Example
///
/// ```rust
/// use iam_signed::clients::graphql::{GraphqlErrorEntry, GraphqlResponseError};
///
/// let error = GraphqlResponseError {
///     data: b"null".to_vec(),
///     errors: vec![GraphqlErrorEntry {
///         message: "boom".to_string(),
///         ..Default::default()
///     }],
/// };
///
/// assert_eq!(error.to_string(), "GraphQL returned 1 error(s)\n []: boom");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphqlResponseError {
    /// Raw JSON bytes of the `data` member, possibly partial or `null`.
    pub data: Vec<u8>,
    /// The errors, in response order.
    pub errors: Vec<GraphqlErrorEntry>,
}

impl fmt::Display for GraphqlResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphQL returned {} error(s)", self.errors.len())?;
        for entry in &self.errors {
            write!(f, "\n {}: {}", entry.display_locations(), entry.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphqlResponseError {}

/// Error type for AppSync operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The request could not be built, signed or delivered.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The body was not a GraphQL envelope.
    #[error(transparent)]
    Parse(#[from] ResponseParseError),

    /// The envelope carried one or more GraphQL errors.
    #[error(transparent)]
    Response(#[from] GraphqlResponseError),
}

impl GraphqlError {
    /// Returns the partial `data` delivered alongside GraphQL errors.
    #[must_use]
    pub fn partial_data(&self) -> Option<&[u8]> {
        match self {
            Self::Response(e) => Some(&e.data),
            _ => None,
        }
    }

    /// Returns the status code if the endpoint answered with a non-200 status.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }
}
