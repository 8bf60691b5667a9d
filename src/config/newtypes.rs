//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use crate::error::ConfigError;

/// A validated Kit API credential.
///
/// Depending on the configured [`AuthMode`](crate::AuthMode), this holds
/// either a personal API key or an OAuth access token. The newtype ensures
/// the value is non-empty and masks it in debug output to prevent accidental
/// exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the credential value, displaying only
/// `ApiCredential(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use kit_api::ApiCredential;
///
/// let credential = ApiCredential::new("kit_abc123").unwrap();
/// assert_eq!(credential.as_ref(), "kit_abc123");
/// assert_eq!(format!("{:?}", credential), "ApiCredential(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Creates a new validated API credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the value is empty.
    pub fn new(credential: impl Into<String>) -> Result<Self, ConfigError> {
        let credential = credential.into();
        if credential.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        Ok(Self(credential))
    }
}

impl AsRef<str> for ApiCredential {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(*****)")
    }
}

/// A validated API base URL.
///
/// This newtype validates that the value carries an `http` or `https` scheme
/// and normalizes it by stripping any trailing slash, so path joining in the
/// HTTP client always inserts exactly one separator.
///
/// # Example
///
/// ```rust
/// use kit_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.kit.com/v4/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.kit.com/v4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// Trailing slashes are stripped during normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is empty or does
    /// not start with `http://` or `https://`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        if trimmed.is_empty()
            || !(trimmed.starts_with("https://") || trimmed.starts_with("http://"))
        {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_credential_accepts_non_empty_value() {
        let credential = ApiCredential::new("kit_abc123").unwrap();
        assert_eq!(credential.as_ref(), "kit_abc123");
    }

    #[test]
    fn test_api_credential_rejects_empty_value() {
        let result = ApiCredential::new("");
        assert!(matches!(result, Err(ConfigError::EmptyCredential)));
    }

    #[test]
    fn test_api_credential_debug_is_masked() {
        let credential = ApiCredential::new("super-secret").unwrap();
        let debug = format!("{credential:?}");
        assert_eq!(debug, "ApiCredential(*****)");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://api.kit.com/v4/").unwrap();
        assert_eq!(url.as_ref(), "https://api.kit.com/v4");
    }

    #[test]
    fn test_base_url_without_trailing_slash_is_unchanged() {
        let url = BaseUrl::new("https://api.kit.com/v4").unwrap();
        assert_eq!(url.as_ref(), "https://api.kit.com/v4");
    }

    #[test]
    fn test_base_url_accepts_http_scheme() {
        let url = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        let result = BaseUrl::new("api.kit.com/v4");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_url_rejects_empty_value() {
        let result = BaseUrl::new("");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }
}
