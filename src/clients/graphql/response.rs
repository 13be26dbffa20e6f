//! GraphQL response envelope.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

/// A single `{line, column}` position inside the GraphQL document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    /// 1-based line number.
    #[serde(default)]
    pub line: i64,
    /// 1-based column number.
    #[serde(default)]
    pub column: i64,
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{line:{} column:{}}}", self.line, self.column)
    }
}

/// One entry of the `errors` array of a GraphQL response.
///
/// Every field is optional on the wire; missing or `null` fields take their
/// default value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlErrorEntry {
    /// Human-readable error message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Positions in the query the error refers to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<ErrorLocation>,
    /// Path to the response field that failed (field names and list indices).
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: Vec<serde_json::Value>,
    /// AppSync error classification, for example `Unauthorized`.
    #[serde(rename = "errorType", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl GraphqlErrorEntry {
    /// Renders the locations as `[{line:L column:C} ...]`.
    #[must_use]
    pub fn display_locations(&self) -> String {
        let rendered: Vec<String> = self.locations.iter().map(ToString::to_string).collect();
        format!("[{}]", rendered.join(" "))
    }
}

/// A parsed GraphQL response envelope.
///
/// `data` is kept as the raw JSON text of the `data` member, byte for byte.
/// It is empty when the member is absent and `null` when the server sent a
/// literal `null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphqlResponse {
    /// Raw JSON bytes of the `data` member.
    pub data: Vec<u8>,
    /// Errors in response order.
    pub errors: Vec<GraphqlErrorEntry>,
}

impl GraphqlResponse {
    /// Parses a response body as a GraphQL envelope.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not a JSON object
    /// matching the envelope shape. A bare `null` body is an empty envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope = serde_json::from_slice::<Option<Envelope>>(body)?.unwrap_or_default();
        Ok(Self {
            data: envelope
                .data
                .map(|raw| raw.get().as_bytes().to_vec())
                .unwrap_or_default(),
            errors: envelope.errors,
        })
    }

    /// Returns `true` if the response carries at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Default, Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "present")]
    data: Option<Box<RawValue>>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<GraphqlErrorEntry>,
}

// Wraps any present value, `null` included, so only an absent key yields None.
fn present<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
