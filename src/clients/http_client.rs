//! HTTP client delivering signed requests to AWS endpoints.
//!
//! This module provides the [`HttpClient`] type. It builds, signs and sends
//! a request in a single attempt, racing the network round trip against the
//! caller's cancellation token.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio_util::sync::CancellationToken;

use crate::auth::sigv4;
use crate::auth::ProvideCredentials;
use crate::clients::errors::{HttpError, TransportError, UnexpectedStatusError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{self, HttpResponse, SUCCESS_STATUS};
use crate::config::{AwsService, ClientConfig, Region};
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

static SHARED_CLIENT: OnceLock<HttpClient> = OnceLock::new();

/// HTTP client for delivering SigV4-signed requests.
///
/// The client handles:
/// - Request construction with `Content-Type: application/json`
/// - SigV4 signing for the target service and region
/// - A single network attempt, cancellable by the caller
/// - Strict status validation (only 200 succeeds)
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Calls keep no state on the client, so one
/// instance can serve any number of concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// use iam_signed::{ClientConfig, HttpClient, Credentials};
/// use std::time::Duration;
///
/// let config = ClientConfig::builder().timeout(Duration::from_secs(10)).build()?;
/// let client = HttpClient::new(&config)?;
///
/// let creds = Credentials::new("AKID", "secret");
/// let data = client
///     .app_sync(br#"{"query":"{ ping }"}"#.to_vec(), endpoint, "us-east-1", &creds)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying client cannot be
    /// created (for example, TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}iam-signed v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|e| ConfigError::HttpClient {
                reason: format!("invalid user agent: {e}"),
            })?,
        );

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(default_headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })?;

        Ok(Self { client, user_agent })
    }

    /// Returns the process-wide client with default configuration.
    ///
    /// The free functions ([`crate::app_sync`], [`crate::api_gateway`] and
    /// their cancellable variants) use this client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the client cannot be created.
    pub fn shared() -> Result<&'static Self, ConfigError> {
        if let Some(client) = SHARED_CLIENT.get() {
            return Ok(client);
        }
        let client = Self::new(&ClientConfig::default())?;
        Ok(SHARED_CLIENT.get_or_init(|| client))
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds, signs and sends a request, returning the successful response.
    ///
    /// Runs request construction, SigV4 signing for `service`, and a single
    /// network attempt. A fresh request is built and signed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The method, endpoint or region is invalid (`InvalidRequest`, `Config`)
    /// - Credentials cannot be resolved (`Signing`)
    /// - The network call fails or is cancelled (`Transport`)
    /// - The status is not exactly 200 (`UnexpectedStatus`)
    #[allow(clippy::too_many_arguments)]
    pub async fn deliver(
        &self,
        cancel: &CancellationToken,
        payload: Vec<u8>,
        service: AwsService,
        endpoint: &str,
        region: &str,
        method: HttpMethod,
        credentials: &dyn ProvideCredentials,
    ) -> Result<HttpResponse, HttpError> {
        let region = Region::new(region)?;
        let mut request = HttpRequest::builder(method, endpoint)
            .body(payload)
            .build()?;
        sigv4::sign(&mut request, service, &region, credentials)?;
        self.send(request, cancel).await
    }

    /// Sends an already signed request.
    ///
    /// The request is consumed: a signed request is single-use. The send and
    /// the body read both race `cancel`; when it fires, the in-flight
    /// future is dropped, which aborts the connection.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] on network failure or cancellation,
    /// and [`HttpError::UnexpectedStatus`] for any status other than 200.
    pub async fn send(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, HttpError> {
        let method = request.http_method;
        let url = request.url.to_string();

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("Request {} {} cancelled before response", method, url);
                return Err(TransportError::Cancelled.into());
            }
            result = self.client.execute(request.into_reqwest()) => result?,
        };

        let code = response.status().as_u16();
        let headers = http_response::parse_response_headers(response.headers());
        tracing::debug!(
            "Received status {} from {} {} (request id: {})",
            code,
            method,
            url,
            http_response::request_id(&headers).unwrap_or("-")
        );

        if code != SUCCESS_STATUS {
            return Err(UnexpectedStatusError {
                code,
                request_id: http_response::request_id(&headers).map(String::from),
                error_type: http_response::error_type(&headers).map(String::from),
            }
            .into());
        }

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("Request {} {} cancelled while reading body", method, url);
                return Err(TransportError::Cancelled.into());
            }
            result = response.bytes() => result?,
        };

        Ok(HttpResponse::new(code, headers, body.to_vec()))
    }
}
