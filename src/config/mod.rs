//! Configuration types for the IAM-signed delivery library.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Settings for the HTTP client that delivers signed requests
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`Region`]: A validated AWS region newtype
//! - [`AwsService`]: The signing namespace (`appsync` or `execute-api`)
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use iam_signed::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .timeout(Duration::from_secs(30))
//!     .user_agent_prefix("my-app/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
//! ```

mod newtypes;
mod service;

pub use newtypes::Region;
pub use service::AwsService;

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the HTTP client used to deliver signed requests.
///
/// All settings are optional. A default configuration applies no timeout
/// beyond the caller's cancellation token and sends the library's own
/// `User-Agent`.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the total request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the connection timeout, if configured.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for constructing [`ClientConfig`] instances.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with no settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a total timeout for each request, from connect to end of body.
    ///
    /// A timeout surfaces as a transport error, exactly like any other
    /// network failure. It is never retried.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a timeout for establishing the connection only.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    ///
    /// The prefix is separated from the library's own identifier by ` | `.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDuration`] if a timeout is zero.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroDuration { field: "timeout" });
        }
        if self.connect_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroDuration {
                field: "connect_timeout",
            });
        }

        Ok(ClientConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent_prefix: self.user_agent_prefix.filter(|p| !p.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_settings() {
        let config = ClientConfig::builder().build().unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.timeout().is_none());
        assert!(config.connect_timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .user_agent_prefix("reporter/2.1")
            .build()
            .unwrap();

        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.user_agent_prefix(), Some("reporter/2.1"));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ClientConfig::builder().timeout(Duration::ZERO).build();
        assert_eq!(result, Err(ConfigError::ZeroDuration { field: "timeout" }));

        let result = ClientConfig::builder()
            .connect_timeout(Duration::ZERO)
            .build();
        assert_eq!(
            result,
            Err(ConfigError::ZeroDuration {
                field: "connect_timeout"
            })
        );
    }

    #[test]
    fn test_empty_user_agent_prefix_is_ignored() {
        let config = ClientConfig::builder()
            .user_agent_prefix("")
            .build()
            .unwrap();
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }
}
