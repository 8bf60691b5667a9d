//! HTTP client functionality for API communication.
//!
//! This module provides the shared request engine used by every resource
//! handler in the SDK:
//!
//! - [`HttpClient`]: the request engine with automatic retry handling
//! - [`RequestOptions`]: per-call headers, query parameters, and body
//! - [`HttpMethod`]: supported HTTP verbs
//! - [`ApiError`]: the error taxonomy for failed calls
//!
//! # Example
//!
//! ```rust,ignore
//! use kit_api::clients::{HttpClient, RequestOptions};
//!
//! let client = HttpClient::new(&config);
//! let tags = client
//!     .get("/tags", RequestOptions::new().query_param("per_page", "25"))
//!     .await?;
//! ```

mod errors;
mod http_client;
mod http_request;

pub use errors::{ApiError, InvalidParamsError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, RequestOptions};
