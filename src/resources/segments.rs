//! Segments resource handler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::Pagination;
use crate::resources::decode_required;

/// Handler for the Segments API endpoints.
///
/// Accessed via [`Kit::segments`](crate::Kit::segments).
#[derive(Clone, Copy, Debug)]
pub struct SegmentsHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> SegmentsHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns a paginated list of all segments.
    ///
    /// See <https://developers.kit.com/v4#list-segments>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListSegmentsParams) -> Result<ListSegments, ApiError> {
        let mut options = RequestOptions::new();

        if let Some(after) = params.after {
            options = options.query_param("after", after);
        }
        if let Some(before) = params.before {
            options = options.query_param("before", before);
        }
        if let Some(include_total_count) = params.include_total_count {
            options = options.query_param("include_total_count", include_total_count.to_string());
        }
        if let Some(per_page) = params.per_page {
            options = options.query_param("per_page", per_page.to_string());
        }

        decode_required(self.http.get("/segments", options).await?)
    }
}

/// Parameters for [`SegmentsHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListSegmentsParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// A saved segment of subscribers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Segment {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A page of segments.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListSegments {
    pub segments: Vec<Segment>,
    pub pagination: Pagination,
}
