//! AWS credentials and the providers that resolve them.
//!
//! Signing borrows credentials through the [`ProvideCredentials`] trait. The
//! library never stores or mutates them; rotation and refresh are the
//! provider's business.
//!
//! # Providers
//!
//! - [`Credentials`]: static credentials, returned as-is
//! - [`EnvironmentCredentials`]: read from the standard `AWS_*` variables
//! - [`RefreshingCredentials`]: cache around a refresh callback
//! - Any `Fn() -> Result<Credentials, CredentialsError>` closure
//!
//! # Example
//!
//! ```rust
//! use iam_signed::auth::{Credentials, ProvideCredentials};
//!
//! let creds = Credentials::new("AKIDEXAMPLE", "secret").with_session_token("token");
//! let resolved = creds.provide_credentials().unwrap();
//! assert_eq!(resolved.access_key_id(), "AKIDEXAMPLE");
//! assert_eq!(resolved.session_token(), Some("token"));
//! ```

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Environment variable holding the access key id.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Legacy alias for [`ENV_ACCESS_KEY_ID`].
pub const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY";
/// Environment variable holding the secret access key.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Legacy alias for [`ENV_SECRET_ACCESS_KEY`].
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_KEY";
/// Environment variable holding the optional session token.
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Default window before expiry in which [`RefreshingCredentials`] refreshes.
pub const DEFAULT_EXPIRY_WINDOW: Duration = Duration::from_secs(60);

/// Errors raised while resolving credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// The access key id or secret access key is empty.
    #[error("Credentials are incomplete: access key id and secret access key must be non-empty.")]
    Empty,

    /// A required environment variable is not set.
    #[error("Missing environment variable {var}.")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },

    /// The provider could not produce credentials.
    #[error("Credential provider failed: {reason}")]
    ProviderFailed {
        /// Description of the failure, as reported by the provider.
        reason: String,
    },
}

/// AWS credentials used to sign a request.
///
/// The secret access key and session token are masked in `Debug` output so
/// credentials never end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Creates long-lived credentials from an access key pair.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            expires_at: None,
        }
    }

    /// Attaches a session token (temporary credentials from STS).
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Sets the instant after which these credentials are no longer valid.
    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns the access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Returns the session token, if any.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Returns the expiry instant, if any.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns `true` if the credentials have expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }

    fn expires_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let window = chrono::Duration::from_std(window).unwrap_or_else(|_| chrono::Duration::zero());
        self.expires_at.is_some_and(|expiry| expiry - window <= now)
    }

    fn ensure_complete(&self) -> Result<(), CredentialsError> {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return Err(CredentialsError::Empty);
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"*****")
            .field("session_token", &self.session_token.as_ref().map(|_| "*****"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Resolves the credentials used to sign a single request.
///
/// Called once per signing operation. Implementations that fetch or rotate
/// credentials must handle their own synchronization.
pub trait ProvideCredentials: Send + Sync {
    /// Returns credentials valid for signing right now.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] if no usable credentials are available.
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError>;
}

impl ProvideCredentials for Credentials {
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
        self.ensure_complete()?;
        Ok(self.clone())
    }
}

impl<F> ProvideCredentials for F
where
    F: Fn() -> Result<Credentials, CredentialsError> + Send + Sync,
{
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
        let credentials = self()?;
        credentials.ensure_complete()?;
        Ok(credentials)
    }
}

/// Reads credentials from the process environment on every call.
///
/// Looks up `AWS_ACCESS_KEY_ID` (or `AWS_ACCESS_KEY`),
/// `AWS_SECRET_ACCESS_KEY` (or `AWS_SECRET_KEY`), and the optional
/// `AWS_SESSION_TOKEN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvironmentCredentials;

impl EnvironmentCredentials {
    /// Creates a new environment provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn lookup(
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, CredentialsError> {
        let non_empty = |name: &str| var(name).filter(|v| !v.is_empty());

        let access_key_id = non_empty(ENV_ACCESS_KEY_ID)
            .or_else(|| non_empty(ENV_ACCESS_KEY))
            .ok_or(CredentialsError::MissingEnvVar {
                var: ENV_ACCESS_KEY_ID,
            })?;
        let secret_access_key = non_empty(ENV_SECRET_ACCESS_KEY)
            .or_else(|| non_empty(ENV_SECRET_KEY))
            .ok_or(CredentialsError::MissingEnvVar {
                var: ENV_SECRET_ACCESS_KEY,
            })?;

        let mut credentials = Credentials::new(access_key_id, secret_access_key);
        if let Some(token) = non_empty(ENV_SESSION_TOKEN) {
            credentials = credentials.with_session_token(token);
        }
        Ok(credentials)
    }
}

impl ProvideCredentials for EnvironmentCredentials {
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
        Self::lookup(|name| std::env::var(name).ok())
    }
}

/// Caches credentials produced by a refresh callback.
///
/// The callback runs on first use and again whenever the cached credentials
/// are within the expiry window of their `expires_at`. Credentials without
/// an expiry are cached forever. Concurrent callers that observe stale
/// credentials serialize on an internal lock, so the callback runs once per
/// refresh.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use iam_signed::auth::{Credentials, CredentialsError, ProvideCredentials, RefreshingCredentials};
///
/// let provider = RefreshingCredentials::new(|| -> Result<Credentials, CredentialsError> {
///     Ok(Credentials::new("AKID", "secret").with_expiry(Utc::now() + Duration::hours(1)))
/// });
///
/// let creds = provider.provide_credentials().unwrap();
/// assert_eq!(creds.access_key_id(), "AKID");
/// ```
pub struct RefreshingCredentials<F> {
    refresh: F,
    expiry_window: Duration,
    cached: Mutex<Option<Credentials>>,
}

impl<F> RefreshingCredentials<F>
where
    F: Fn() -> Result<Credentials, CredentialsError> + Send + Sync,
{
    /// Creates a provider around `refresh` with [`DEFAULT_EXPIRY_WINDOW`].
    #[must_use]
    pub const fn new(refresh: F) -> Self {
        Self {
            refresh,
            expiry_window: DEFAULT_EXPIRY_WINDOW,
            cached: Mutex::new(None),
        }
    }

    /// Sets how long before expiry the cached credentials are refreshed.
    #[must_use]
    pub const fn expiry_window(mut self, window: Duration) -> Self {
        self.expiry_window = window;
        self
    }

    /// Drops the cached credentials so the next call refreshes.
    pub fn invalidate(&self) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = None;
        }
    }
}

impl<F> ProvideCredentials for RefreshingCredentials<F>
where
    F: Fn() -> Result<Credentials, CredentialsError> + Send + Sync,
{
    fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| CredentialsError::ProviderFailed {
                reason: "credential cache lock poisoned".to_string(),
            })?;

        let now = Utc::now();
        if let Some(credentials) = cached.as_ref() {
            if !credentials.expires_within(now, self.expiry_window) {
                return Ok(credentials.clone());
            }
        }

        tracing::debug!("Refreshing AWS credentials");
        let fresh = (self.refresh)()?;
        fresh.ensure_complete()?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }
}

impl<F> fmt::Debug for RefreshingCredentials<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshingCredentials")
            .field("expiry_window", &self.expiry_window)
            .finish_non_exhaustive()
    }
}
