//! Configuration error types for the IAM-signed delivery library.
//!
//! This module contains the error returned when client configuration or
//! validated input values (such as an AWS region) are rejected.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any network activity happens.
//!
//! # Example
//!
//! ```rust
//! use iam_signed::{ConfigError, Region};
//!
//! let result = Region::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidRegion { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the library.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Region is empty or contains invalid characters.
    #[error("Invalid AWS region '{region}'. Expected lowercase letters, digits and hyphens (e.g., 'us-east-1').")]
    InvalidRegion {
        /// The invalid region that was provided.
        region: String,
    },

    /// Service identifier is not one of the supported signing namespaces.
    #[error("Unknown AWS service '{service}'. Expected 'appsync' or 'execute-api'.")]
    UnknownService {
        /// The service name that was provided.
        service: String,
    },

    /// A duration setting was zero.
    #[error("Invalid {field}: a zero duration would fail every request.")]
    ZeroDuration {
        /// The name of the offending setting.
        field: &'static str,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Could not create HTTP client: {reason}")]
    HttpClient {
        /// Description of the construction failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_region_error_message() {
        let error = ConfigError::InvalidRegion {
            region: "US EAST".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("US EAST"));
        assert!(message.contains("us-east-1"));
    }

    #[test]
    fn test_zero_duration_error_message() {
        let error = ConfigError::ZeroDuration { field: "timeout" };
        assert!(error.to_string().contains("timeout"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::UnknownService {
            service: "s3".to_string(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
