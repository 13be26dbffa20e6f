//! GraphQL response unwrapping for AppSync.
//!
//! AppSync always answers with a GraphQL envelope:
//!
//! ```json
//! {"data": {...}, "errors": [{"message": "...", "locations": [...], "path": [...], "errorType": "..."}]}
//! ```
//!
//! [`parse_graphql_response`] turns that envelope into either the raw
//! `data` bytes or a [`GraphqlResponseError`] that still carries them.
//!
//! # Example
//!
//! ```rust
//! use iam_signed::clients::graphql::parse_graphql_response;
//!
//! let data = parse_graphql_response(br#"{"data":{"x":1},"errors":[]}"#).unwrap();
//! assert_eq!(data, br#"{"x":1}"#);
//!
//! let error = parse_graphql_response(br#"{"data":null,"errors":[{"message":"boom"}]}"#)
//!     .unwrap_err();
//! assert_eq!(error.partial_data(), Some(&b"null"[..]));
//! ```

mod errors;
mod response;

pub use errors::{GraphqlError, GraphqlResponseError, ResponseParseError, MAX_SNIPPET_BYTES};
pub use response::{ErrorLocation, GraphqlErrorEntry, GraphqlResponse};

/// Parses a full response body and unwraps its `data`.
///
/// # Errors
///
/// - [`GraphqlError::Parse`] if the body is not a GraphQL envelope
/// - [`GraphqlError::Response`] if the `errors` array is non-empty; the
///   error keeps the `data` bytes
pub fn parse_graphql_response(body: impl AsRef<[u8]>) -> Result<Vec<u8>, GraphqlError> {
    let body = body.as_ref();
    let response =
        GraphqlResponse::from_slice(body).map_err(|e| ResponseParseError::new(body, e))?;

    if response.has_errors() {
        tracing::warn!(
            "GraphQL response carried {} error(s); first: {}",
            response.errors.len(),
            response.errors[0].message
        );
        return Err(GraphqlResponseError {
            data: response.data,
            errors: response.errors,
        }
        .into());
    }

    Ok(response.data)
}
