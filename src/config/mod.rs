//! Configuration types for the Kit API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Kit.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`KitConfig`]: The main configuration struct holding all SDK settings
//! - [`KitConfigBuilder`]: A builder for constructing [`KitConfig`] instances
//! - [`AuthMode`]: The authentication scheme used for requests
//! - [`ApiCredential`]: A validated credential newtype with masked debug output
//! - [`BaseUrl`]: A validated, normalized API base URL
//!
//! # Example
//!
//! ```rust
//! use kit_api::{ApiCredential, KitConfig};
//!
//! let config = KitConfig::builder()
//!     .credential(ApiCredential::new("my-api-key").unwrap())
//!     .max_retries(5)
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiCredential, BaseUrl};

use std::collections::HashMap;

use crate::error::ConfigError;

/// The default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.kit.com/v4";

/// The default maximum number of retry attempts for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// The default base delay in milliseconds for exponential backoff retries.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// The environment variable consulted when no credential is provided.
const CREDENTIAL_ENV_VAR: &str = "KIT_API_KEY";

/// The authentication scheme used for API requests.
///
/// - [`AuthMode::ApiKey`] is used for personal requests against your own
///   account and sends the credential in the `X-Kit-Api-Key` header.
/// - [`AuthMode::OAuth`] is used for auth flows that may involve accounts
///   of other users of the platform and sends the credential as a bearer
///   token in the `Authorization` header.
///
/// If you don't know which one to use, use [`AuthMode::ApiKey`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Personal API key sent as `X-Kit-Api-Key`.
    #[default]
    ApiKey,
    /// OAuth access token sent as `Authorization: Bearer`.
    OAuth,
}

/// Configuration for the Kit API SDK.
///
/// This struct holds all configuration needed for SDK operations: the API
/// base URL, retry policy, and authentication settings. It is immutable
/// after construction and shared by every request the client makes.
///
/// # Thread Safety
///
/// `KitConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use kit_api::{ApiCredential, AuthMode, KitConfig};
///
/// let config = KitConfig::builder()
///     .credential(ApiCredential::new("oauth-token").unwrap())
///     .auth_mode(AuthMode::OAuth)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.auth_mode(), AuthMode::OAuth);
/// ```
#[derive(Clone, Debug)]
pub struct KitConfig {
    base_url: BaseUrl,
    max_retries: u32,
    retry_delay_ms: u64,
    auth_mode: AuthMode,
    credential: ApiCredential,
}

// Verify KitConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KitConfig>();
};

impl KitConfig {
    /// Creates a new builder for constructing a `KitConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kit_api::{ApiCredential, KitConfig};
    ///
    /// let config = KitConfig::builder()
    ///     .credential(ApiCredential::new("key").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> KitConfigBuilder {
        KitConfigBuilder::new()
    }

    /// Returns the normalized API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the maximum number of retry attempts.
    ///
    /// A value of 0 means a single attempt with no retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the base retry delay in milliseconds.
    #[must_use]
    pub const fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    /// Returns the authentication mode.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Returns the API credential.
    #[must_use]
    pub const fn credential(&self) -> &ApiCredential {
        &self.credential
    }

    /// Returns the authentication headers derived from the configured mode.
    ///
    /// This is a pure function of the configuration: the same config always
    /// produces the same header map.
    #[must_use]
    pub fn auth_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        match self.auth_mode {
            AuthMode::OAuth => {
                headers.insert(
                    "Authorization".to_string(),
                    format!("Bearer {}", self.credential.as_ref()),
                );
            }
            AuthMode::ApiKey => {
                headers.insert(
                    "X-Kit-Api-Key".to_string(),
                    self.credential.as_ref().to_string(),
                );
            }
        }
        headers
    }
}

/// Builder for constructing [`KitConfig`] instances.
///
/// The only required field is `credential`; when it is not set explicitly,
/// `build()` falls back to reading the `KIT_API_KEY` environment variable
/// once. All other fields have defaults matching the remote API's
/// recommendations.
///
/// # Defaults
///
/// - `base_url`: `https://api.kit.com/v4`
/// - `max_retries`: 3
/// - `retry_delay`: 1000 ms
/// - `auth_mode`: [`AuthMode::ApiKey`]
///
/// # Example
///
/// ```rust
/// use kit_api::{ApiCredential, AuthMode, BaseUrl, KitConfig};
///
/// let config = KitConfig::builder()
///     .credential(ApiCredential::new("key").unwrap())
///     .base_url(BaseUrl::new("https://api.example.com/v4").unwrap())
///     .max_retries(2)
///     .retry_delay_ms(250)
///     .auth_mode(AuthMode::ApiKey)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct KitConfigBuilder {
    base_url: Option<BaseUrl>,
    max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
    auth_mode: Option<AuthMode>,
    credential: Option<ApiCredential>,
}

impl KitConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the maximum number of retry attempts for transient failures.
    ///
    /// Requests are retried for 5xx server errors, 429 rate limiting
    /// responses, and network errors. A value of 0 disables retries.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the base delay in milliseconds for exponential backoff retries.
    ///
    /// Each retry waits progressively longer: the first retry waits
    /// approximately this long, the second twice as long, and so on,
    /// with ±25% jitter applied to avoid synchronized retry storms.
    #[must_use]
    pub const fn retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = Some(retry_delay_ms);
        self
    }

    /// Sets the authentication mode.
    #[must_use]
    pub const fn auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = Some(auth_mode);
        self
    }

    /// Sets the API credential.
    #[must_use]
    pub fn credential(mut self, credential: ApiCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Builds the [`KitConfig`], resolving the credential if necessary.
    ///
    /// When no credential was set explicitly, the `KIT_API_KEY` environment
    /// variable is read exactly once here; there are no lazy environment
    /// reads after construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if no credential was
    /// provided and the environment variable is unset or empty.
    pub fn build(self) -> Result<KitConfig, ConfigError> {
        let credential = match self.credential {
            Some(credential) => credential,
            None => std::env::var(CREDENTIAL_ENV_VAR)
                .ok()
                .filter(|value| !value.is_empty())
                .map(ApiCredential::new)
                .transpose()?
                .ok_or(ConfigError::MissingCredential)?,
        };

        let base_url = match self.base_url {
            Some(base_url) => base_url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(KitConfig {
            base_url,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_delay_ms: self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS),
            auth_mode: self.auth_mode.unwrap_or_default(),
            credential,
        })
    }
}
