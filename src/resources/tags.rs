//! Tags resource handler.
//!
//! Tags label subscribers for targeting and automation. This handler
//! covers tag CRUD, tagging/untagging subscribers individually, and the
//! bulk tagging endpoints (which require an OAuth credential).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{date_time_param, EmptyResponse, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Tags API endpoints.
///
/// Accessed via [`Kit::tags`](crate::Kit::tags).
///
/// # Example
///
/// ```rust,ignore
/// let kit = Kit::new(config);
///
/// let tags = kit.tags().list(ListTagsParams::default()).await?;
/// if tags.pagination.has_next_page {
///     let next = kit
///         .tags()
///         .list(ListTagsParams {
///             after: tags.pagination.end_cursor.clone(),
///             ..Default::default()
///         })
///         .await?;
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TagsHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> TagsHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates multiple tags in one bulk operation.
    ///
    /// For 100 or fewer tags the request runs synchronously and returns
    /// the created tags with any failures; above that it is processed
    /// asynchronously and returns an empty response. Set a `callback_url`
    /// to retrieve the status of an asynchronous request. This endpoint
    /// must be used with an OAuth credential.
    ///
    /// See <https://developers.kit.com/v4#bulk-create-tags>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn bulk_create(&self, params: BulkCreateTagsParams) -> Result<BulkCreateTags, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/bulk/tags", options).await?)
    }

    /// Removes multiple tag/subscriber combinations in one bulk operation.
    ///
    /// This endpoint must be used with an OAuth credential.
    ///
    /// See <https://developers.kit.com/v4#bulk-remove-tags-from-subscribers>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn bulk_remove(&self, params: BulkTaggingParams) -> Result<BulkRemoveTags, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.delete("/bulk/tags/subscribers", options).await?)
    }

    /// Applies multiple tag/subscriber combinations in one bulk operation.
    ///
    /// This endpoint must be used with an OAuth credential.
    ///
    /// See <https://developers.kit.com/v4#bulk-tag-subscribers>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn bulk_tag(&self, params: BulkTaggingParams) -> Result<BulkTagSubscribers, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/bulk/tags/subscribers", options).await?)
    }

    /// Returns a paginated list of all tags.
    ///
    /// See <https://developers.kit.com/v4#list-tags>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListTagsParams) -> Result<ListTags, ApiError> {
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

        decode_required(self.http.get("/tags", options).await?)
    }

    /// Creates a new tag.
    ///
    /// See <https://developers.kit.com/v4#create-a-tag>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, name: &str) -> Result<TagResponse, ApiError> {
        let body = serde_json::to_string(&serde_json::json!({ "name": name }))?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/tags", options).await?)
    }

    /// Renames a tag. Returns `None` if the tag was not found.
    ///
    /// See <https://developers.kit.com/v4#update-tag-name>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update(&self, tag_id: u64, name: &str) -> Result<Option<TagResponse>, ApiError> {
        let body = serde_json::to_string(&serde_json::json!({ "name": name }))?;
        let options = RequestOptions::new().body(body);

        decode_optional(self.http.put(&format!("/tags/{tag_id}"), options).await?)
    }

    /// Removes a subscriber from a tag by email address.
    ///
    /// Returns `None` if the tag or subscriber was not found, or if the
    /// subscriber was not tagged with the specified tag.
    ///
    /// See <https://developers.kit.com/v4#remove-tag-from-subscriber-by-email-address>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn remove_subscriber_by_email(
        &self,
        tag_id: u64,
        email_address: &str,
    ) -> Result<Option<EmptyResponse>, ApiError> {
        let body =
            serde_json::to_string(&serde_json::json!({ "email_address": email_address }))?;
        let options = RequestOptions::new().body(body);

        decode_optional(
            self.http
                .delete(&format!("/tags/{tag_id}/subscribers"), options)
                .await?,
        )
    }

    /// Returns a paginated list of subscribers for a tag, or `None` if the
    /// tag was not found.
    ///
    /// See <https://developers.kit.com/v4#list-subscribers-for-a-tag>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_subscribers(
        &self,
        tag_id: u64,
        params: ListTagSubscribersParams,
    ) -> Result<Option<ListTagSubscribers>, ApiError> {
        let mut options = RequestOptions::new();

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
        if let Some(tagged_after) = params.tagged_after {
            options = options.query_param("tagged_after", date_time_param(&tagged_after));
        }
        if let Some(tagged_before) = params.tagged_before {
            options = options.query_param("tagged_before", date_time_param(&tagged_before));
        }

        decode_optional(
            self.http
                .get(&format!("/tags/{tag_id}/subscribers"), options)
                .await?,
        )
    }

    /// Tags a subscriber by email address, or returns `None` if the tag was
    /// not found.
    ///
    /// The email address must already belong to a subscriber on the
    /// account, otherwise the call fails.
    ///
    /// See <https://developers.kit.com/v4#tag-a-subscriber-by-email-address>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn tag_subscriber_by_email(
        &self,
        tag_id: u64,
        email_address: &str,
    ) -> Result<Option<TaggedSubscriberResponse>, ApiError> {
        let body =
            serde_json::to_string(&serde_json::json!({ "email_address": email_address }))?;
        let options = RequestOptions::new().body(body);

        decode_optional(
            self.http
                .post(&format!("/tags/{tag_id}/subscribers"), options)
                .await?,
        )
    }

    /// Removes a subscriber from a tag by their unique ID.
    ///
    /// Returns `None` if the tag or subscriber was not found, or if the
    /// subscriber was not tagged with the specified tag.
    ///
    /// See <https://developers.kit.com/v4#remove-tag-from-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn remove_subscriber(
        &self,
        tag_id: u64,
        subscriber_id: u64,
    ) -> Result<Option<EmptyResponse>, ApiError> {
        decode_optional(
            self.http
                .delete(
                    &format!("/tags/{tag_id}/subscribers/{subscriber_id}"),
                    RequestOptions::new(),
                )
                .await?,
        )
    }

    /// Tags a subscriber by their unique ID, or returns `None` if the tag
    /// or subscriber was not found.
    ///
    /// See <https://developers.kit.com/v4#tag-a-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn tag_subscriber(
        &self,
        tag_id: u64,
        subscriber_id: u64,
    ) -> Result<Option<TaggedSubscriberResponse>, ApiError> {
        decode_optional(
            self.http
                .post(
                    &format!("/tags/{tag_id}/subscribers/{subscriber_id}"),
                    RequestOptions::new(),
                )
                .await?,
        )
    }
}

/// A tag on the account.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One tag/subscriber combination for the bulk tagging endpoints.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Tagging {
    pub tag_id: u64,
    pub subscriber_id: u64,
}

/// Parameters for [`TagsHandler::bulk_create`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct BulkCreateTagsParams {
    /// The tags to create.
    pub tags: Vec<NewTag>,
    /// URL notified after processing when the request runs asynchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// A tag to create in a bulk operation.
#[derive(Clone, Debug, Serialize)]
pub struct NewTag {
    pub name: String,
}

/// Parameters for [`TagsHandler::bulk_tag`] and [`TagsHandler::bulk_remove`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct BulkTaggingParams {
    /// The tag/subscriber combinations to process.
    pub taggings: Vec<Tagging>,
    /// URL notified after processing when the request runs asynchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Outcome of a bulk tag creation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulkCreateTags {
    /// The request ran synchronously.
    Synchronous {
        /// The tags that were created.
        tags: Vec<Tag>,
        /// Tags that could not be created, with the reasons.
        failures: Vec<TagFailure>,
    },
    /// The request was queued for asynchronous processing.
    Asynchronous {},
}

/// A tag that failed to be created in a bulk operation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TagFailure {
    pub tag: serde_json::Value,
    pub errors: Vec<String>,
}

/// Outcome of a bulk tag removal.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulkRemoveTags {
    /// The request ran synchronously.
    Synchronous {
        /// Combinations that could not be removed, with the reasons.
        failures: Vec<TaggingFailure>,
    },
    /// The request was queued for asynchronous processing.
    Asynchronous {},
}

/// Outcome of a bulk tagging.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulkTagSubscribers {
    /// The request ran synchronously.
    Synchronous {
        /// The subscribers that were tagged.
        subscribers: Vec<TaggedSubscriber>,
        /// Combinations that could not be processed, with the reasons.
        failures: Vec<TaggingFailure>,
    },
    /// The request was queued for asynchronous processing.
    Asynchronous {},
}

/// A tag/subscriber combination that failed in a bulk operation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TaggingFailure {
    pub tagging: serde_json::Value,
    pub errors: Vec<String>,
}

/// Parameters for [`TagsHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListTagsParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// A page of tags.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListTags {
    pub tags: Vec<Tag>,
    pub pagination: Pagination,
}

/// A single tag wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TagResponse {
    pub tag: Tag,
}

/// Parameters for [`TagsHandler::list_subscribers`].
#[derive(Clone, Debug, Default)]
pub struct ListTagSubscribersParams {
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
    /// Only subscribers tagged after this time.
    pub tagged_after: Option<DateTime<Utc>>,
    /// Only subscribers tagged before this time.
    pub tagged_before: Option<DateTime<Utc>>,
}

/// A subscriber with the timestamp they were tagged at.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TaggedSubscriber {
    pub id: u64,
    pub first_name: Option<String>,
    pub email_address: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_at: Option<DateTime<Utc>>,
    /// Custom field values keyed by the field's key.
    #[serde(default)]
    pub fields: HashMap<String, Option<String>>,
}

/// A page of subscribers attached to a tag.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListTagSubscribers {
    pub subscribers: Vec<TaggedSubscriber>,
    pub pagination: Pagination,
}

/// A single tagged subscriber wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TaggedSubscriberResponse {
    pub subscriber: TaggedSubscriber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_deserialization() {
        let json = r#"{"tag": {"id": 42, "name": "Beginners", "created_at": "2023-06-01T10:00:00Z"}}"#;
        let response: TagResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tag.id, 42);
        assert_eq!(response.tag.name, "Beginners");
    }

    #[test]
    fn test_bulk_tagging_params_serialization() {
        let params = BulkTaggingParams {
            taggings: vec![
                Tagging {
                    tag_id: 1,
                    subscriber_id: 10,
                },
                Tagging {
                    tag_id: 2,
                    subscriber_id: 20,
                },
            ],
            callback_url: Some("https://example.com/hook".to_string()),
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["taggings"][0]["tag_id"], 1);
        assert_eq!(json["taggings"][1]["subscriber_id"], 20);
        assert_eq!(json["callback_url"], "https://example.com/hook");
    }

    #[test]
    fn test_bulk_create_tags_discriminates_by_shape() {
        let sync_json = r#"{
            "tags": [{"id": 1, "name": "A", "created_at": "2023-01-01T00:00:00Z"}],
            "failures": []
        }"#;
        let response: BulkCreateTags = serde_json::from_str(sync_json).unwrap();
        assert!(matches!(response, BulkCreateTags::Synchronous { .. }));

        let async_response: BulkCreateTags = serde_json::from_str("{}").unwrap();
        assert!(matches!(async_response, BulkCreateTags::Asynchronous {}));
    }

    #[test]
    fn test_bulk_remove_discriminates_by_failures_presence() {
        let sync_json = r#"{"failures": [{"tagging": {"tag_id": 1, "subscriber_id": 2}, "errors": ["Tag not found"]}]}"#;
        let response: BulkRemoveTags = serde_json::from_str(sync_json).unwrap();
        match response {
            BulkRemoveTags::Synchronous { failures } => {
                assert_eq!(failures[0].errors[0], "Tag not found");
            }
            BulkRemoveTags::Asynchronous {} => panic!("expected synchronous"),
        }

        let async_response: BulkRemoveTags = serde_json::from_str("{}").unwrap();
        assert!(matches!(async_response, BulkRemoveTags::Asynchronous {}));
    }

    #[test]
    fn test_tagged_subscriber_deserialization() {
        let json = r#"{
            "subscriber": {
                "id": 7,
                "first_name": "Ada",
                "email_address": "ada@example.com",
                "state": "active",
                "created_at": "2023-01-01T00:00:00Z",
                "tagged_at": "2023-06-15T09:30:00Z",
                "fields": {}
            }
        }"#;

        let response: TaggedSubscriberResponse = serde_json::from_str(json).unwrap();
        assert!(response.subscriber.tagged_at.is_some());
    }
}
