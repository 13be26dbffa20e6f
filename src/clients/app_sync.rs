//! AppSync (GraphQL) delivery.

use tokio_util::sync::CancellationToken;

use crate::auth::ProvideCredentials;
use crate::clients::graphql::{parse_graphql_response, GraphqlError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpMethod;
use crate::config::AwsService;

impl HttpClient {
    /// Signs and POSTs a GraphQL payload to AppSync and unwraps the response.
    ///
    /// Equivalent to [`HttpClient::app_sync_with_cancellation`] with a token
    /// that never fires.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::app_sync_with_cancellation`].
    pub async fn app_sync(
        &self,
        payload: Vec<u8>,
        endpoint: &str,
        region: &str,
        credentials: &dyn ProvideCredentials,
    ) -> Result<Vec<u8>, GraphqlError> {
        self.app_sync_with_cancellation(
            &CancellationToken::new(),
            payload,
            endpoint,
            region,
            credentials,
        )
        .await
    }

    /// Signs and POSTs a GraphQL payload to AppSync, racing `cancel`.
    ///
    /// Returns the raw bytes of the response's `data` member.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] if building, signing or delivery fails, or
    ///   the status is not 200
    /// - [`GraphqlError::Parse`] if the body is not a GraphQL envelope
    /// - [`GraphqlError::Response`] if the envelope carries errors; the
    ///   partial `data` travels with the error
    pub async fn app_sync_with_cancellation(
        &self,
        cancel: &CancellationToken,
        payload: Vec<u8>,
        endpoint: &str,
        region: &str,
        credentials: &dyn ProvideCredentials,
    ) -> Result<Vec<u8>, GraphqlError> {
        let response = self
            .deliver(
                cancel,
                payload,
                AwsService::AppSync,
                endpoint,
                region,
                HttpMethod::Post,
                credentials,
            )
            .await?;
        parse_graphql_response(response.into_body())
    }
}

/// Signs and POSTs a GraphQL payload to AppSync using the shared client.
///
/// # Errors
///
/// See [`HttpClient::app_sync_with_cancellation`]. A failure to create the
/// shared client surfaces as [`GraphqlError::Http`].
///
/// # Example
///
/// ```rust,ignore
/// use iam_signed::{app_sync, EnvironmentCredentials};
///
/// let data = app_sync(
///     br#"{"query":"query { listItems { items { id } } }"}"#.to_vec(),
///     "https://abc.appsync-api.eu-west-1.amazonaws.com/graphql",
///     "eu-west-1",
///     &EnvironmentCredentials,
/// )
/// .await?;
/// ```
pub async fn app_sync(
    payload: Vec<u8>,
    endpoint: &str,
    region: &str,
    credentials: &dyn ProvideCredentials,
) -> Result<Vec<u8>, GraphqlError> {
    app_sync_with_cancellation(
        &CancellationToken::new(),
        payload,
        endpoint,
        region,
        credentials,
    )
    .await
}

/// Cancellable form of [`app_sync`].
///
/// # Errors
///
/// See [`HttpClient::app_sync_with_cancellation`].
pub async fn app_sync_with_cancellation(
    cancel: &CancellationToken,
    payload: Vec<u8>,
    endpoint: &str,
    region: &str,
    credentials: &dyn ProvideCredentials,
) -> Result<Vec<u8>, GraphqlError> {
    let client = HttpClient::shared().map_err(crate::clients::HttpError::from)?;
    client
        .app_sync_with_cancellation(cancel, payload, endpoint, region, credentials)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, CredentialsError};
    use crate::clients::{HttpError, InvalidHttpRequestError};

    #[tokio::test]
    async fn test_invalid_endpoint_is_construction_error() {
        let creds = Credentials::new("AKID", "secret");
        let result = app_sync(b"{}".to_vec(), "::not a url::", "us-east-1", &creds).await;

        assert!(matches!(
            result,
            Err(GraphqlError::Http(HttpError::InvalidRequest(
                InvalidHttpRequestError::InvalidEndpoint { .. }
            )))
        ));
    }

    #[tokio::test]
    async fn test_credential_failure_is_signing_error() {
        let provider = || -> Result<Credentials, CredentialsError> {
            Err(CredentialsError::ProviderFailed {
                reason: "sts unavailable".to_string(),
            })
        };
        let result = app_sync(
            b"{}".to_vec(),
            "https://abc.appsync-api.us-east-1.amazonaws.com/graphql",
            "us-east-1",
            &provider,
        )
        .await;

        assert!(matches!(result, Err(GraphqlError::Http(HttpError::Signing(_)))));
    }
}
