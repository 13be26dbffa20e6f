//! # iam-signed
//!
//! Deliver IAM-signed (AWS Signature Version 4) requests to AWS AppSync
//! GraphQL endpoints and API Gateway REST endpoints.
//!
//! ## Overview
//!
//! This crate provides:
//! - SigV4 request signing via [`auth::sigv4`]
//! - Credential providers: static [`Credentials`], [`EnvironmentCredentials`],
//!   and the caching [`RefreshingCredentials`]
//! - A single-attempt async transport with caller-driven cancellation
//! - Strict status validation (only 200 is success)
//! - GraphQL response unwrapping for AppSync, keeping partial `data` on errors
//!
//! ## AppSync
//!
//! ```rust,ignore
//! use iam_signed::{app_sync, EnvironmentCredentials};
//!
//! let data = app_sync(
//!     br#"{"query":"query { getItem(id: \"1\") { id name } }"}"#.to_vec(),
//!     "https://abc.appsync-api.us-east-1.amazonaws.com/graphql",
//!     "us-east-1",
//!     &EnvironmentCredentials::new(),
//! )
//! .await?;
//! // data holds the raw JSON of the `data` member
//! ```
//!
//! ## API Gateway
//!
//! ```rust,ignore
//! use iam_signed::{api_gateway, Credentials};
//!
//! let creds = Credentials::new("AKID", "secret").with_session_token("token");
//! let body = api_gateway(
//!     br#"{"name":"widget"}"#.to_vec(),
//!     "https://abc123.execute-api.us-east-1.amazonaws.com/prod/items",
//!     "us-east-1",
//!     "PUT",
//!     &creds,
//! )
//! .await?;
//! ```
//!
//! ## Cancellation
//!
//! Every entry point has a `_with_cancellation` form taking a
//! [`CancellationToken`](tokio_util::sync::CancellationToken). Firing the
//! token aborts the in-flight request and the call returns
//! [`TransportError::Cancelled`].
//!
//! ```rust,ignore
//! use tokio_util::sync::CancellationToken;
//! use iam_signed::api_gateway_with_cancellation;
//!
//! let cancel = CancellationToken::new();
//! let guard = cancel.clone();
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(2)).await;
//!     guard.cancel();
//! });
//! let result = api_gateway_with_cancellation(&cancel, payload, endpoint, region, "GET", &creds).await;
//! ```
//!
//! ## Custom Client Settings
//!
//! The free functions share one client with default settings. Build your
//! own [`HttpClient`] for timeouts or a `User-Agent` prefix:
//!
//! ```rust
//! use std::time::Duration;
//! use iam_signed::{ClientConfig, HttpClient};
//!
//! let config = ClientConfig::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent_prefix("inventory-sync/1.4")
//!     .build()
//!     .unwrap();
//! let client = HttpClient::new(&config).unwrap();
//! assert!(client.user_agent().starts_with("inventory-sync/1.4 | iam-signed v"));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (signing and responses at `debug`,
//! GraphQL errors at `warn`). Install a subscriber to see them.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{
    Credentials, CredentialsError, EnvironmentCredentials, ProvideCredentials,
    RefreshingCredentials,
};
pub use auth::sigv4::SigningError;
pub use config::{AwsService, ClientConfig, ClientConfigBuilder, Region};
pub use error::ConfigError;

// Re-export client types at crate root
pub use clients::{
    api_gateway, api_gateway_with_cancellation, app_sync, app_sync_with_cancellation,
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, InvalidHttpRequestError,
    TransportError, UnexpectedStatusError,
};

// Re-export GraphQL types at crate root
pub use clients::graphql::{
    parse_graphql_response, GraphqlError, GraphqlErrorEntry, GraphqlResponseError,
    ResponseParseError,
};
