//! Sequences resource handler.
//!
//! Sequences (courses) are automated email series. This handler covers
//! listing sequences, listing their subscribers, and adding subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{date_time_param, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Sequences API endpoints.
///
/// Accessed via [`Kit::sequences`](crate::Kit::sequences).
#[derive(Clone, Copy, Debug)]
pub struct SequencesHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> SequencesHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns a paginated list of all sequences.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListSequencesParams) -> Result<ListSequences, ApiError> {
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

        decode_required(self.http.get("/sequences", options).await?)
    }

    /// Returns a paginated list of subscribers for a sequence, or `None`
    /// if the sequence does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_subscribers(
        &self,
        id: u64,
        params: ListSequenceSubscribersParams,
    ) -> Result<Option<ListSequenceSubscribers>, ApiError> {
        let mut options = RequestOptions::new();

        if let Some(added_after) = params.added_after {
            options = options.query_param("added_after", date_time_param(&added_after));
        }
        if let Some(added_before) = params.added_before {
            options = options.query_param("added_before", date_time_param(&added_before));
        }
        if let Some(after) = params.after {
            options = options.query_param("after", after);
        }
        if let Some(before) = params.before {
            options = options.query_param("before", before);
        }
        if let Some(created_after) = params.created_after {
            options = options.query_param("created_after", date_time_param(&created_after));
        }
        if let Some(created_before) = params.created_before {
            options = options.query_param("created_before", date_time_param(&created_before));
        }
        if let Some(include_total_count) = params.include_total_count {
            options = options.query_param("include_total_count", include_total_count.to_string());
        }
        if let Some(per_page) = params.per_page {
            options = options.query_param("per_page", per_page.to_string());
        }
        if let Some(status) = params.status {
            options = options.query_param("status", status);
        }

        decode_optional(
            self.http
                .get(&format!("/sequences/{id}/subscribers"), options)
                .await?,
        )
    }

    /// Adds a subscriber to a sequence by email address, or returns `None`
    /// if the sequence does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn add_subscriber_by_email(
        &self,
        id: u64,
        email_address: &str,
    ) -> Result<Option<SequenceSubscriberResponse>, ApiError> {
        let body =
            serde_json::to_string(&serde_json::json!({ "email_address": email_address }))?;
        let options = RequestOptions::new().body(body);

        decode_optional(
            self.http
                .post(&format!("/sequences/{id}/subscribers"), options)
                .await?,
        )
    }

    /// Adds a subscriber to a sequence by their unique ID, or returns
    /// `None` if the sequence or subscriber does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn add_subscriber_by_id(
        &self,
        id: u64,
        subscriber_id: u64,
    ) -> Result<Option<SequenceSubscriberResponse>, ApiError> {
        decode_optional(
            self.http
                .post(
                    &format!("/sequences/{id}/subscribers/{subscriber_id}"),
                    RequestOptions::new(),
                )
                .await?,
        )
    }
}

/// Parameters for [`SequencesHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListSequencesParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// Parameters for [`SequencesHandler::list_subscribers`].
#[derive(Clone, Debug, Default)]
pub struct ListSequenceSubscribersParams {
    /// Only subscribers added to the sequence after this time.
    pub added_after: Option<DateTime<Utc>>,
    /// Only subscribers added to the sequence before this time.
    pub added_before: Option<DateTime<Utc>>,
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Only subscribers created after this time.
    pub created_after: Option<DateTime<Utc>>,
    /// Only subscribers created before this time.
    pub created_before: Option<DateTime<Utc>>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page.
    pub per_page: Option<u32>,
    /// Filter by subscriber status. Defaults to `active` on the remote API.
    pub status: Option<String>,
}

/// An automated email sequence.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Sequence {
    pub id: u64,
    pub name: String,
    /// Whether new subscribers are held from entering the sequence.
    pub hold: bool,
    /// Whether the sequence repeats for returning subscribers.
    pub repeat: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A page of sequences.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListSequences {
    pub sequences: Vec<Sequence>,
    pub pagination: Pagination,
}

/// A subscriber as attached to a sequence.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SequenceSubscriber {
    pub id: u64,
    pub first_name: Option<String>,
    pub email_address: Option<String>,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: HashMap<String, Option<String>>,
}

/// A page of subscribers attached to a sequence.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListSequenceSubscribers {
    pub subscribers: Vec<SequenceSubscriber>,
    pub pagination: Pagination,
}

/// A single sequence subscriber wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SequenceSubscriberResponse {
    pub subscriber: SequenceSubscriber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_deserialization() {
        let json = r#"{
            "sequences": [
                {"id": 3, "name": "Welcome series", "hold": false, "repeat": false, "created_at": "2023-05-01T08:00:00Z"}
            ],
            "pagination": {
                "has_previous_page": false,
                "has_next_page": false,
                "start_cursor": null,
                "end_cursor": null,
                "per_page": 500
            }
        }"#;

        let response: ListSequences = serde_json::from_str(json).unwrap();
        assert_eq!(response.sequences[0].name, "Welcome series");
        assert!(!response.sequences[0].hold);
    }

    #[test]
    fn test_sequence_subscriber_allows_null_email() {
        let json = r#"{
            "subscriber": {
                "id": 8,
                "first_name": null,
                "email_address": null,
                "state": "active",
                "fields": {}
            }
        }"#;

        let response: SequenceSubscriberResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.subscriber.email_address, None);
    }
}
