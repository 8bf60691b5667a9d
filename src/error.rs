//! Error types for SDK configuration.
//!
//! This module contains error types used for configuration and
//! construction-time validation failures.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use kit_api::{ApiCredential, ConfigError};
//!
//! let result = ApiCredential::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyCredential)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No credential was provided and the environment fallback is unset.
    #[error("The KIT_API_KEY environment variable is missing or empty. Please provide it, or pass in the credential explicitly when initialising this SDK.")]
    MissingCredential,

    /// The credential cannot be empty.
    #[error("API credential cannot be empty. Please provide a valid Kit API key or OAuth access token.")]
    EmptyCredential,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.kit.com/v4').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
