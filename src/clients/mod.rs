//! HTTP delivery of SigV4-signed requests.
//!
//! This module provides the pipeline that builds, signs and sends a request
//! to an AWS endpoint, then validates the response.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async client that delivers signed requests
//! - [`HttpRequest`]: A request to be signed and sent
//! - [`HttpResponse`]: A fully read 200 response
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`HttpError`]: Unified error type for building, signing and delivery
//! - [`graphql`]: GraphQL envelope parsing for AppSync responses
//!
//! # Pipeline
//!
//! Every call runs the same stages in order:
//!
//! 1. Build the request with `Content-Type: application/json`
//! 2. Sign it for the target service and region
//! 3. Send it once, racing the caller's cancellation token
//! 4. Accept only status 200
//! 5. For AppSync, unwrap the GraphQL envelope
//!
//! There are no retries. Callers that want them re-run the whole call,
//! which builds and signs a fresh request.
//!
//! # Example
//!
//! ```rust,ignore
//! use iam_signed::clients::HttpClient;
//! use iam_signed::{ClientConfig, Credentials};
//!
//! let client = HttpClient::new(&ClientConfig::default())?;
//! let creds = Credentials::new("AKID", "secret");
//!
//! let body = client
//!     .api_gateway(Vec::new(), endpoint, "us-east-1", "GET", &creds)
//!     .await?;
//! ```

mod api_gateway;
mod app_sync;
mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use api_gateway::{api_gateway, api_gateway_with_cancellation};
pub use app_sync::{app_sync, app_sync_with_cancellation};
pub use errors::{HttpError, InvalidHttpRequestError, TransportError, UnexpectedStatusError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, JSON_CONTENT_TYPE};
pub use http_response::{HttpResponse, SUCCESS_STATUS};

pub use graphql::{GraphqlError, GraphqlResponseError, ResponseParseError};
