//! HTTP request types for the Kit API SDK.
//!
//! This module provides the [`HttpMethod`] enum and the [`RequestOptions`]
//! type used to shape individual calls made through
//! [`HttpClient`](crate::clients::HttpClient).

use std::collections::HashMap;
use std::fmt;

/// HTTP methods supported by the Kit API.
///
/// The SDK supports the four standard HTTP methods used by REST APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the corresponding [`reqwest::Method`].
    #[must_use]
    pub const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Per-call options for a request made through the HTTP client.
///
/// Options are assembled with a fluent API and cover the three per-call
/// inputs the engine accepts:
///
/// - extra headers, which win over the client's defaults on key collision
/// - query parameters, kept in insertion order and omitted from the URL
///   entirely when empty
/// - a pre-serialized request body, sent verbatim (the engine never
///   re-encodes it)
///
/// # Example
///
/// ```rust
/// use kit_api::clients::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query_param("per_page", "25")
///     .header("X-Request-Tag", "example")
///     .body(r#"{"name":"Newsletter"}"#);
///
/// assert_eq!(options.query(), &[("per_page".to_string(), "25".to_string())]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    headers: HashMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestOptions {
    /// Creates empty request options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Appends a single query parameter, preserving insertion order.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the pre-serialized request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the extra headers for this call.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the ordered query parameters for this call.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body_ref(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
