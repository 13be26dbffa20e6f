//! SigV4 signing of outbound requests.
//!
//! The signer resolves credentials, computes the signature over the
//! canonical request, and writes `Authorization`, `X-Amz-Date` and (for
//! temporary credentials) `X-Amz-Security-Token` into the request headers.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use sha2::Sha256;

use super::canonical::{
    build_canonical_request, canonical_headers, canonical_query, canonical_uri, hash_payload,
    signed_headers,
};
use super::error::SigningError;
use crate::auth::credentials::ProvideCredentials;
use crate::clients::HttpRequest;
use crate::config::{AwsService, Region};

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm this signer produces.
pub const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Header carrying the signing timestamp.
pub const X_AMZ_DATE: &str = "x-amz-date";

/// Header carrying the session token of temporary credentials.
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// Headers that never take part in the signature. Proxies and tracing
/// layers rewrite them in flight.
const UNSIGNED_HEADERS: &[&str] = &["authorization", "user-agent", "x-amzn-trace-id"];

/// Signs `request` for `service` in `region` at the current time.
///
/// Each call stamps a fresh timestamp, so a request must be signed exactly
/// once. Signing it again replaces the signature headers.
///
/// The URL query is rewritten into its canonical form (sorted, RFC 3986
/// encoded) so the server receives exactly the query that was signed.
///
/// # Errors
///
/// Returns [`SigningError`] if credentials cannot be resolved, have
/// expired, or produce an invalid header value.
///
/// # Example
///
/// ```rust
/// use iam_signed::auth::sigv4;
/// use iam_signed::auth::Credentials;
/// use iam_signed::clients::HttpRequest;
/// use iam_signed::{AwsService, Region};
///
/// let mut request = HttpRequest::new(
///     "POST",
///     "https://example.appsync-api.us-east-1.amazonaws.com/graphql",
///     br#"{"query":"{ ping }"}"#.to_vec(),
/// )
/// .unwrap();
///
/// let region = Region::new("us-east-1").unwrap();
/// let creds = Credentials::new("AKIDEXAMPLE", "secret");
/// sigv4::sign(&mut request, AwsService::AppSync, &region, &creds).unwrap();
///
/// assert!(request.headers.contains_key("authorization"));
/// assert!(request.headers.contains_key("x-amz-date"));
/// ```
pub fn sign(
    request: &mut HttpRequest,
    service: AwsService,
    region: &Region,
    credentials: &dyn ProvideCredentials,
) -> Result<(), SigningError> {
    sign_at(request, service, region, credentials, Utc::now())
}

/// Signs `request` using an explicit signing time.
///
/// # Errors
///
/// See [`sign`].
pub fn sign_at(
    request: &mut HttpRequest,
    service: AwsService,
    region: &Region,
    credentials: &dyn ProvideCredentials,
    time: DateTime<Utc>,
) -> Result<(), SigningError> {
    sign_scoped(
        request,
        service.as_str(),
        region.as_ref(),
        credentials,
        time,
    )
}

pub(crate) fn sign_scoped(
    request: &mut HttpRequest,
    service: &str,
    region: &str,
    credentials: &dyn ProvideCredentials,
    time: DateTime<Utc>,
) -> Result<(), SigningError> {
    let credentials = credentials.provide_credentials()?;
    if credentials.is_expired_at(time) {
        return Err(SigningError::ExpiredCredentials {
            expired_at: credentials.expires_at().unwrap_or(time),
        });
    }

    let amz_date = time.format("%Y%m%dT%H%M%SZ").to_string();
    let date = time.format("%Y%m%d").to_string();

    // Stale signature headers from an earlier attempt must not be signed.
    request.headers.remove(AUTHORIZATION);
    request.headers.remove(X_AMZ_SECURITY_TOKEN);
    request
        .headers
        .insert(X_AMZ_DATE, header_value(X_AMZ_DATE, &amz_date)?);
    if let Some(token) = credentials.session_token() {
        request
            .headers
            .insert(X_AMZ_SECURITY_TOKEN, header_value(X_AMZ_SECURITY_TOKEN, token)?);
    }

    // The query goes on the wire exactly as it is signed.
    let query = canonical_query(&request.url);
    if !query.is_empty() {
        request.url.set_query(Some(&query));
    }

    let host = host_header(request);
    let mut header_pairs: Vec<(&str, &str)> = vec![("host", host.as_str())];
    for (name, value) in &request.headers {
        if UNSIGNED_HEADERS.contains(&name.as_str()) {
            continue;
        }
        let value = value
            .to_str()
            .map_err(|_| SigningError::InvalidHeaderValue {
                name: name.as_str().to_string(),
            })?;
        header_pairs.push((name.as_str(), value));
    }
    let headers = canonical_headers(header_pairs);

    let canonical_request = build_canonical_request(
        request.http_method.as_str(),
        &canonical_uri(&request.url),
        &query,
        &headers,
        &hash_payload(&request.body),
    );

    let credential_scope = format!("{date}/{region}/{service}/aws4_request");
    let string_to_sign = build_string_to_sign(
        &amz_date,
        &credential_scope,
        &hash_payload(canonical_request.as_bytes()),
    );
    let signing_key = derive_signing_key(credentials.secret_access_key(), &date, region, service);
    let signature = compute_signature(&signing_key, &string_to_sign);

    let signed = signed_headers(&headers);
    let authorization = format!(
        "{SIGNING_ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed}, Signature={signature}",
        credentials.access_key_id()
    );
    request.headers.insert(
        AUTHORIZATION,
        header_value(AUTHORIZATION.as_str(), &authorization)?,
    );

    tracing::debug!(
        "Signed {} request to {} for {} in {} (signed headers: {})",
        request.http_method,
        request.url,
        service,
        region,
        signed
    );

    Ok(())
}

/// Builds the string to sign from the timestamp, scope and canonical request hash.
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{SIGNING_ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Derives the SigV4 signing key using the HMAC-SHA256 chain.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, b"aws4_request")
}

/// Computes the hex-encoded HMAC-SHA256 signature of `data`.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// The `Host` value the transport will send: host, plus the port when it
/// is not the scheme default.
fn host_header(request: &HttpRequest) -> String {
    let host = request.url.host_str().unwrap_or_default();
    match request.url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, SigningError> {
    HeaderValue::from_str(value).map_err(|_| SigningError::InvalidHeaderValue {
        name: name.to_string(),
    })
}
