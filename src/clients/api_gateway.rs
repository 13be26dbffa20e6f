//! API Gateway (REST) delivery.

use tokio_util::sync::CancellationToken;

use crate::auth::ProvideCredentials;
use crate::clients::errors::HttpError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpMethod;
use crate::config::AwsService;

impl HttpClient {
    /// Signs and sends a request to API Gateway, returning the raw body.
    ///
    /// Equivalent to [`HttpClient::api_gateway_with_cancellation`] with a
    /// token that never fires.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::api_gateway_with_cancellation`].
    pub async fn api_gateway(
        &self,
        payload: Vec<u8>,
        endpoint: &str,
        region: &str,
        method: &str,
        credentials: &dyn ProvideCredentials,
    ) -> Result<Vec<u8>, HttpError> {
        self.api_gateway_with_cancellation(
            &CancellationToken::new(),
            payload,
            endpoint,
            region,
            method,
            credentials,
        )
        .await
    }

    /// Signs and sends a request to API Gateway, racing `cancel`.
    ///
    /// The body is returned as is; no JSON parsing takes place.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] for an unknown method or bad endpoint
    /// - [`HttpError::Config`] for an invalid region
    /// - [`HttpError::Signing`] if credentials cannot be resolved
    /// - [`HttpError::Transport`] on network failure or cancellation
    /// - [`HttpError::UnexpectedStatus`] for any status other than 200
    pub async fn api_gateway_with_cancellation(
        &self,
        cancel: &CancellationToken,
        payload: Vec<u8>,
        endpoint: &str,
        region: &str,
        method: &str,
        credentials: &dyn ProvideCredentials,
    ) -> Result<Vec<u8>, HttpError> {
        let method: HttpMethod = method.parse()?;
        let response = self
            .deliver(
                cancel,
                payload,
                AwsService::ApiGateway,
                endpoint,
                region,
                method,
                credentials,
            )
            .await?;
        Ok(response.into_body())
    }
}

/// Signs and sends a request to API Gateway using the shared client.
///
/// # Errors
///
/// See [`HttpClient::api_gateway_with_cancellation`]. A failure to create
/// the shared client surfaces as [`HttpError::Config`].
///
/// # Example
///
/// ```rust,ignore
/// use iam_signed::{api_gateway, Credentials};
///
/// let creds = Credentials::new("AKID", "secret");
/// let body = api_gateway(
///     Vec::new(),
///     "https://abc123.execute-api.us-east-1.amazonaws.com/prod/items",
///     "us-east-1",
///     "GET",
///     &creds,
/// )
/// .await?;
/// ```
pub async fn api_gateway(
    payload: Vec<u8>,
    endpoint: &str,
    region: &str,
    method: &str,
    credentials: &dyn ProvideCredentials,
) -> Result<Vec<u8>, HttpError> {
    api_gateway_with_cancellation(
        &CancellationToken::new(),
        payload,
        endpoint,
        region,
        method,
        credentials,
    )
    .await
}

/// Cancellable form of [`api_gateway`].
///
/// # Errors
///
/// See [`HttpClient::api_gateway_with_cancellation`].
pub async fn api_gateway_with_cancellation(
    cancel: &CancellationToken,
    payload: Vec<u8>,
    endpoint: &str,
    region: &str,
    method: &str,
    credentials: &dyn ProvideCredentials,
) -> Result<Vec<u8>, HttpError> {
    HttpClient::shared()?
        .api_gateway_with_cancellation(cancel, payload, endpoint, region, method, credentials)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::clients::InvalidHttpRequestError;

    #[tokio::test]
    async fn test_unknown_method_is_construction_error() {
        let creds = Credentials::new("AKID", "secret");
        let result = api_gateway(
            Vec::new(),
            "https://abc123.execute-api.us-east-1.amazonaws.com/prod",
            "us-east-1",
            "BREW",
            &creds,
        )
        .await;

        assert!(matches!(
            result,
            Err(HttpError::InvalidRequest(InvalidHttpRequestError::InvalidMethod { .. }))
        ));
    }

    #[tokio::test]
    async fn test_empty_credentials_fail_before_sending() {
        let creds = Credentials::new("", "");
        let result = api_gateway(
            Vec::new(),
            "https://abc123.execute-api.us-east-1.amazonaws.com/prod",
            "us-east-1",
            "GET",
            &creds,
        )
        .await;

        assert!(matches!(result, Err(HttpError::Signing(_))));
    }
}
