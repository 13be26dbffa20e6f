//! AWS service identifiers used as the SigV4 signing namespace.
//!
//! This module provides the [`AwsService`] enum. The service name is part of
//! the credential scope, so a signature computed for one service is never
//! accepted by another.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The AWS service a request is signed for.
///
/// # Example
///
/// ```rust
/// use iam_signed::AwsService;
///
/// assert_eq!(AwsService::AppSync.as_str(), "appsync");
/// assert_eq!(AwsService::ApiGateway.to_string(), "execute-api");
///
/// let service: AwsService = "execute-api".parse().unwrap();
/// assert_eq!(service, AwsService::ApiGateway);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AwsService {
    /// AWS AppSync GraphQL endpoints (`appsync`).
    AppSync,
    /// Amazon API Gateway REST endpoints (`execute-api`).
    ApiGateway,
}

impl AwsService {
    /// Returns the signing name of the service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AppSync => "appsync",
            Self::ApiGateway => "execute-api",
        }
    }
}

impl fmt::Display for AwsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AwsService {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "appsync" => Ok(Self::AppSync),
            "execute-api" => Ok(Self::ApiGateway),
            _ => Err(ConfigError::UnknownService {
                service: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_signing_names() {
        assert_eq!(AwsService::AppSync.as_str(), "appsync");
        assert_eq!(AwsService::ApiGateway.as_str(), "execute-api");
    }

    #[test]
    fn test_service_from_str_is_case_insensitive() {
        assert_eq!("AppSync".parse::<AwsService>(), Ok(AwsService::AppSync));
        assert_eq!(
            " EXECUTE-API ".parse::<AwsService>(),
            Ok(AwsService::ApiGateway)
        );
    }

    #[test]
    fn test_service_from_str_rejects_unknown() {
        assert!(matches!(
            "s3".parse::<AwsService>(),
            Err(ConfigError::UnknownService { service }) if service == "s3"
        ));
    }
}
