//! Error types for API communication.
//!
//! This module contains the error taxonomy surfaced by the HTTP client.
//! Failures are classified structurally, by enum variant rather than by
//! inspecting message text, so retry eligibility is unambiguous.
//!
//! # Error Handling
//!
//! - [`ApiError::Transport`]: the request failed before a response was
//!   obtained (connection refused, DNS failure, timeout)
//! - [`ApiError::AuthenticationFailed`] / [`ApiError::InvalidRequest`] /
//!   [`ApiError::RateLimited`] / [`ApiError::ServerError`] /
//!   [`ApiError::Unknown`]: the API answered with a failure status
//! - [`ApiError::Decode`]: the response body was not the JSON shape the
//!   caller expected
//! - [`ApiError::InvalidParams`]: a handler rejected its inputs before
//!   sending anything
//!
//! Note that a 404 response is not an error: the client maps it to `None`
//! as a deliberate absence signal.
//!
//! # Example
//!
//! ```rust,ignore
//! match kit.subscribers().get(123).await {
//!     Ok(Some(found)) => println!("{}", found.subscriber.email_address),
//!     Ok(None) => println!("no such subscriber"),
//!     Err(ApiError::RateLimited { status, detail }) => {
//!         println!("throttled ({status}): {detail}");
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! ```

use thiserror::Error;

/// Client-side parameter validation failures.
///
/// These are raised by resource handlers before any request is sent, for
/// inputs the remote API would reject outright.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidParamsError {
    /// An account colors update was attempted with no colors.
    #[error("Cannot update colors to an empty list. Please enter up to 5 different hex colors.")]
    EmptyColors,

    /// An account colors update was attempted with more than five colors.
    #[error("Cannot update colors with more than 5 colors specified. Please specify between 1 and 5 different colors to update to.")]
    TooManyColors,

    /// A resource operation was attempted with a zero ID.
    #[error("Please provide a valid {resource} id.")]
    InvalidResourceId {
        /// The resource whose ID was invalid.
        resource: &'static str,
    },
}

/// Unified error type for all API operations.
///
/// Every failing call through the client resolves to exactly one of these
/// variants. The retryable variants ([`ApiError::RateLimited`],
/// [`ApiError::ServerError`], [`ApiError::Transport`]) are only ever
/// surfaced after the configured retries have been exhausted; all other
/// variants propagate on first occurrence.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the credential (HTTP 401).
    #[error("Authentication failed: Invalid or expired access token. Status: {status} - {detail}")]
    AuthenticationFailed {
        /// The HTTP status code of the response.
        status: u16,
        /// Detail extracted from the response body.
        detail: String,
    },

    /// The API rejected the request data (HTTP 422).
    #[error("Bad data in request. Status: {status} - {detail}")]
    InvalidRequest {
        /// The HTTP status code of the response.
        status: u16,
        /// Detail extracted from the response body.
        detail: String,
    },

    /// The API throttled the request (HTTP 429).
    #[error("Rate limit exceeded. Status: {status} - {detail}")]
    RateLimited {
        /// The HTTP status code of the response.
        status: u16,
        /// Detail extracted from the response body.
        detail: String,
    },

    /// The API failed internally (HTTP 500 and above).
    #[error("Internal server error. Status: {status} - Details: {detail}")]
    ServerError {
        /// The HTTP status code of the response.
        status: u16,
        /// Detail extracted from the response body.
        detail: String,
    },

    /// Any other non-success status the taxonomy does not name.
    #[error("Unknown error. Status: {status} - Details: {detail}")]
    Unknown {
        /// The HTTP status code of the response.
        status: u16,
        /// Detail extracted from the response body.
        detail: String,
    },

    /// The request failed before a response was obtained.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape the caller expected.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A handler rejected its inputs before sending the request.
    #[error(transparent)]
    InvalidParams(#[from] InvalidParamsError),
}

impl ApiError {
    /// Classifies a non-success HTTP status into its error variant.
    ///
    /// 404 is deliberately absent here: the client maps it to `None`
    /// before classification.
    #[must_use]
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            401 => Self::AuthenticationFailed { status, detail },
            422 => Self::InvalidRequest { status, detail },
            429 => Self::RateLimited { status, detail },
            500.. => Self::ServerError { status, detail },
            _ => Self::Unknown { status, detail },
        }
    }

    /// Returns the HTTP status code, when the error carries one.
    ///
    /// [`ApiError::Transport`], [`ApiError::Decode`], and
    /// [`ApiError::InvalidParams`] have no status of their own.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. }
            | Self::InvalidRequest { status, .. }
            | Self::RateLimited { status, .. }
            | Self::ServerError { status, .. }
            | Self::Unknown { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|code| code.as_u16()),
            Self::Decode(_) | Self::InvalidParams(_) => None,
        }
    }

    /// Returns whether this failure belongs to the transient set the
    /// client retries internally.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ServerError { .. } | Self::Transport(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_401_to_authentication_failed() {
        let error = ApiError::from_status(401, "token expired".to_string());
        assert!(matches!(
            error,
            ApiError::AuthenticationFailed { status: 401, .. }
        ));
        assert!(error.to_string().contains("Authentication failed"));
        assert!(error.to_string().contains("401"));
    }

    #[test]
    fn test_from_status_maps_422_to_invalid_request() {
        let error = ApiError::from_status(422, "Errors: name is required".to_string());
        assert!(matches!(error, ApiError::InvalidRequest { status: 422, .. }));
        assert!(error.to_string().contains("Bad data in request"));
    }

    #[test]
    fn test_from_status_maps_429_to_rate_limited() {
        let error = ApiError::from_status(429, "slow down".to_string());
        assert!(matches!(error, ApiError::RateLimited { status: 429, .. }));
        assert!(error.to_string().contains("Rate limit exceeded"));
    }

    #[test]
    fn test_from_status_maps_5xx_to_server_error() {
        for status in [500, 502, 503] {
            let error = ApiError::from_status(status, "boom".to_string());
            assert!(matches!(error, ApiError::ServerError { .. }));
        }
    }

    #[test]
    fn test_from_status_maps_other_statuses_to_unknown() {
        let error = ApiError::from_status(400, "bad".to_string());
        assert!(matches!(error, ApiError::Unknown { status: 400, .. }));
        assert!(error.to_string().contains("Unknown error"));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(
            ApiError::from_status(429, String::new()).status(),
            Some(429)
        );
        assert_eq!(
            ApiError::InvalidParams(InvalidParamsError::EmptyColors).status(),
            None
        );
    }

    #[test]
    fn test_retryable_set_is_structural() {
        assert!(ApiError::from_status(500, String::new()).is_retryable());
        assert!(ApiError::from_status(429, String::new()).is_retryable());
        assert!(!ApiError::from_status(401, String::new()).is_retryable());
        assert!(!ApiError::from_status(422, String::new()).is_retryable());
        assert!(!ApiError::from_status(400, String::new()).is_retryable());
        assert!(!ApiError::InvalidParams(InvalidParamsError::EmptyColors).is_retryable());
    }

    #[test]
    fn test_retryability_ignores_message_content() {
        // A non-retryable error whose detail happens to mention a status
        // line must stay non-retryable.
        let error = ApiError::from_status(400, "Status: 500 - Details: nope".to_string());
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_invalid_params_messages() {
        assert!(InvalidParamsError::EmptyColors
            .to_string()
            .contains("empty list"));
        assert!(InvalidParamsError::TooManyColors
            .to_string()
            .contains("more than 5"));
        assert!(InvalidParamsError::InvalidResourceId {
            resource: "broadcast"
        }
        .to_string()
        .contains("broadcast"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &ApiError::from_status(500, "x".to_string());
        let _ = error;
    }
}
