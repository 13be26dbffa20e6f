//! Credentials and SigV4 signing.
//!
//! # Overview
//!
//! - [`Credentials`]: An AWS access key pair with optional session token
//! - [`ProvideCredentials`]: Resolves credentials at signing time
//! - [`EnvironmentCredentials`]: Reads credentials from `AWS_*` variables
//! - [`RefreshingCredentials`]: Caches credentials from a refresh callback
//! - [`sigv4`]: The Signature Version 4 signer
//!
//! # Example
//!
//! ```rust
//! use iam_signed::auth::{sigv4, Credentials};
//! use iam_signed::clients::HttpRequest;
//! use iam_signed::{AwsService, Region};
//!
//! let mut request = HttpRequest::new(
//!     "GET",
//!     "https://abc.execute-api.us-east-1.amazonaws.com/prod/items",
//!     Vec::new(),
//! )
//! .unwrap();
//!
//! let creds = Credentials::new("AKIDEXAMPLE", "secret");
//! let region = Region::new("us-east-1").unwrap();
//! sigv4::sign(&mut request, AwsService::ApiGateway, &region, &creds).unwrap();
//! ```

mod credentials;
pub mod sigv4;

pub use credentials::{
    Credentials, CredentialsError, EnvironmentCredentials, ProvideCredentials,
    RefreshingCredentials, DEFAULT_EXPIRY_WINDOW,
};
