//! HTTP response type returned by the transport.

use std::collections::HashMap;

/// Status code the transport accepts as success. Nothing else counts.
pub const SUCCESS_STATUS: u16 = 200;

/// A fully read response from an AWS endpoint.
///
/// The transport only hands out responses whose status is exactly 200, so
/// a value of this type always represents a successful round trip.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is exactly 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code == SUCCESS_STATUS
    }

    /// Returns the first value of a header, by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the AWS request id (`x-amzn-RequestId`), if present.
    ///
    /// Include this id when reporting problems to AWS support.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        request_id(&self.headers)
    }

    /// Consumes the response, returning the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

pub(crate) fn request_id(headers: &HashMap<String, Vec<String>>) -> Option<&str> {
    ["x-amzn-requestid", "x-amz-request-id"]
        .iter()
        .find_map(|name| headers.get(*name).and_then(|values| values.first()))
        .map(String::as_str)
}

pub(crate) fn error_type(headers: &HashMap<String, Vec<String>>) -> Option<&str> {
    headers
        .get("x-amzn-errortype")
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// Parses response headers into a `HashMap` keyed by lowercase name.
pub(crate) fn parse_response_headers(
    headers: &reqwest::header::HeaderMap,
) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
