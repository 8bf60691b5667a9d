//! Resource handlers for the Kit API.
//!
//! Each submodule maps one API resource area to its endpoints. Handlers are
//! thin and stateless: they build paths, assemble query strings, JSON-encode
//! request bodies, and cast the engine's untyped JSON response to the typed
//! shape documented for the endpoint. All retry and failure-handling policy
//! lives in [`HttpClient`](crate::clients::HttpClient).
//!
//! Handlers are accessed through the [`Kit`](crate::Kit) facade:
//!
//! ```rust,ignore
//! let kit = Kit::new(config);
//!
//! let tags = kit.tags().list(ListTagsParams::default()).await?;
//! let subscriber = kit.subscribers().get(123).await?;
//! ```

pub mod accounts;
pub mod broadcasts;
pub mod common;
pub mod custom_fields;
pub mod email_templates;
pub mod forms;
pub mod purchases;
pub mod segments;
pub mod sequences;
pub mod subscribers;
pub mod tags;
pub mod webhooks;

pub use common::{EmptyResponse, Pagination, SubscriberState};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::ApiError;

/// Casts an engine response to the endpoint's typed shape, mapping the
/// 404 absence signal through as `None`.
pub(crate) fn decode_optional<T: DeserializeOwned>(
    value: Option<Value>,
) -> Result<Option<T>, ApiError> {
    match value {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Casts an engine response for endpoints that never report absence.
///
/// A 404 here means the route itself is wrong rather than a missing record,
/// so it surfaces as an error instead of `None`.
pub(crate) fn decode_required<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    match value {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Err(ApiError::Unknown {
            status: 404,
            detail: "Resource not found".to_string(),
        }),
    }
}
