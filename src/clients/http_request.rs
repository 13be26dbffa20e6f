//! Outbound request types.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! is built fresh for every call, mutated in place by the signer, and
//! consumed once by the transport.

use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Url;

use crate::clients::errors::InvalidHttpRequestError;

/// Content type sent with every payload.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods accepted by the request builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP HEAD.
    Head,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
    /// HTTP OPTIONS.
    Options,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire and in the canonical request.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }

    pub(crate) const fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Head => reqwest::Method::HEAD,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// A request to an AWS endpoint, before or after signing.
///
/// # Example
///
/// ```rust
/// use iam_signed::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::new(
///     "post",
///     "https://example.appsync-api.us-east-1.amazonaws.com/graphql",
///     br#"{"query":"{ ping }"}"#.to_vec(),
/// )
/// .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Post);
/// assert_eq!(request.headers["content-type"], "application/json");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// The full endpoint URL.
    pub url: Url,
    /// The raw payload.
    pub body: Vec<u8>,
    /// Request headers. The signer adds its headers here.
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// Builds a JSON request from a method name, endpoint and payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the method is not a known HTTP
    /// verb or the endpoint is not an absolute `http`/`https` URL.
    pub fn new(
        method: &str,
        endpoint: &str,
        payload: Vec<u8>,
    ) -> Result<Self, InvalidHttpRequestError> {
        let method = method.parse()?;
        Self::builder(method, endpoint).body(payload).build()
    }

    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, endpoint)
    }

    pub(crate) fn into_reqwest(self) -> reqwest::Request {
        let mut request = reqwest::Request::new(self.http_method.to_reqwest(), self.url);
        *request.headers_mut() = self.headers;
        *request.body_mut() = Some(self.body.into());
        request
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    endpoint: String,
    body: Vec<u8>,
    extra_headers: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            http_method: method,
            endpoint: endpoint.into(),
            body: Vec::new(),
            extra_headers: Vec::new(),
        }
    }

    /// Sets the raw payload.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds an extra header. Extra headers are signed along with the request.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the endpoint or a header is invalid.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let url = parse_endpoint(&self.endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (key, value) in self.extra_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| InvalidHttpRequestError::InvalidHeader { name: key.clone() })?;
            let value = HeaderValue::from_str(&value)
                .map_err(|_| InvalidHttpRequestError::InvalidHeader { name: key.clone() })?;
            headers.insert(name, value);
        }

        Ok(HttpRequest {
            http_method: self.http_method,
            url,
            body: self.body,
            headers,
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, InvalidHttpRequestError> {
    let invalid = |reason: String| InvalidHttpRequestError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn test_http_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("Patch".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert_eq!(" DELETE ".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
    }

    #[test]
    fn test_http_method_parse_rejects_unknown_verb() {
        assert_eq!(
            "FETCH".parse::<HttpMethod>(),
            Err(InvalidHttpRequestError::InvalidMethod {
                method: "FETCH".to_string()
            })
        );
        assert!("".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_new_sets_json_content_type_and_body() {
        let request = HttpRequest::new(
            "POST",
            "https://abc.appsync-api.us-east-1.amazonaws.com/graphql",
            b"{\"query\":\"{ ping }\"}".to_vec(),
        )
        .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.url.path(), "/graphql");
        assert_eq!(request.body, b"{\"query\":\"{ ping }\"}");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_new_rejects_invalid_method() {
        let result = HttpRequest::new("BREW", "https://example.com/", Vec::new());
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidMethod { method }) if method == "BREW"
        ));
    }

    #[test]
    fn test_new_rejects_unparseable_endpoint() {
        let result = HttpRequest::new("GET", "not a url", Vec::new());
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidEndpoint { endpoint, .. }) if endpoint == "not a url"
        ));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let result = HttpRequest::new("GET", "ftp://example.com/file", Vec::new());
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidEndpoint { reason, .. }) if reason.contains("ftp")
        ));
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://example.com/prod/items")
            .header("X-Api-Version", "2")
            .build()
            .unwrap();

        assert_eq!(request.headers["x-api-version"], "2");
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_builder_rejects_invalid_header() {
        let result = HttpRequest::builder(HttpMethod::Get, "https://example.com/")
            .header("Bad Header", "value")
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidHeader { name }) if name == "Bad Header"
        ));
    }

    #[test]
    fn test_into_reqwest_keeps_method_url_headers_and_body() {
        let request = HttpRequest::new("PUT", "https://example.com/prod/items/1", b"{}".to_vec())
            .unwrap()
            .into_reqwest();

        assert_eq!(request.method(), &reqwest::Method::PUT);
        assert_eq!(request.url().as_str(), "https://example.com/prod/items/1");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.body().and_then(reqwest::Body::as_bytes), Some(&b"{}"[..]));
    }
}
