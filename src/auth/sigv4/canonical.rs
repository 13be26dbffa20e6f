//! Canonical request construction for AWS Signature Version 4.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! HashedPayload
//! ```

use std::collections::BTreeMap;

use reqwest::Url;
use sha2::{Digest, Sha256};

/// Builds the full canonical request string.
///
/// `headers` must already be canonical: lowercase names, normalized values,
/// sorted by name. [`canonical_headers`] produces that shape.
#[must_use]
pub fn build_canonical_request(
    method: &str,
    canonical_uri: &str,
    canonical_query: &str,
    headers: &BTreeMap<String, String>,
    payload_hash: &str,
) -> String {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();
    let signed_headers = signed_headers(headers);

    format!(
        "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
    )
}

/// Builds the canonical URI from the already percent-encoded URL path.
///
/// Every segment is URI-encoded once more, which is the rule for every AWS
/// service except S3. An empty path becomes `/`.
///
/// # Example
///
/// ```rust
/// use iam_signed::auth::sigv4::canonical_uri;
///
/// let url = "https://api.example.com/prod/items/a%20b".parse().unwrap();
/// assert_eq!(canonical_uri(&url), "/prod/items/a%2520b");
/// ```
#[must_use]
pub fn canonical_uri(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }

    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Builds the canonical query string.
///
/// Pairs are decoded, re-encoded with the RFC 3986 unreserved set, and
/// sorted by key then value.
///
/// # Example
///
/// ```rust
/// use iam_signed::auth::sigv4::canonical_query;
///
/// let url = "https://api.example.com/?b=2&a=x y".parse().unwrap();
/// assert_eq!(canonical_query(&url), "a=x%20y&b=2");
/// ```
#[must_use]
pub fn canonical_query(url: &Url) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            (
                urlencoding::encode(&k).into_owned(),
                urlencoding::encode(&v).into_owned(),
            )
        })
        .collect();

    params.sort_unstable();

    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Collects headers into canonical form: lowercase names, trimmed values
/// with inner whitespace collapsed, duplicates joined by commas.
#[must_use]
pub fn canonical_headers<'a>(
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = collapse_whitespace(value.trim());
        map.entry(name.to_lowercase())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    map
}

/// Returns the `SignedHeaders` list: names joined by `;` in sorted order.
#[must_use]
pub fn signed_headers(headers: &BTreeMap<String, String>) -> String {
    headers.keys().map(String::as_str).collect::<Vec<_>>().join(";")
}

/// Returns the lowercase hex SHA-256 of the payload.
///
/// # Example
///
/// ```rust
/// use iam_signed::auth::sigv4::hash_payload;
///
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result
}
