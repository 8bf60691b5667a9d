//! Subscribers resource handler.
//!
//! The central resource of the API: creating, listing, updating, and
//! unsubscribing subscribers, plus bulk creation and tag inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{date_time_param, EmptyResponse, Pagination, SubscriberState};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Subscribers API endpoints.
///
/// Accessed via [`Kit::subscribers`](crate::Kit::subscribers).
#[derive(Clone, Copy, Debug)]
pub struct SubscribersHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> SubscribersHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates subscribers in bulk.
    ///
    /// For 100 or fewer subscribers the request runs synchronously and
    /// returns the created subscribers with any failures. Above that the
    /// remote API processes the request asynchronously and returns an empty
    /// response; provide a `callback_url` to handle the result.
    ///
    /// See <https://developers.kit.com/v4#bulk-create-subscribers>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn bulk_create(
        &self,
        params: BulkCreateSubscribersParams,
    ) -> Result<BulkCreateSubscribers, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/bulk/subscribers", options).await?)
    }

    /// Returns a paginated list of all subscribers.
    ///
    /// See <https://developers.kit.com/v4#list-subscribers>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListSubscribersParams) -> Result<ListSubscribers, ApiError> {
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
        if let Some(email_address) = params.email_address {
            options = options.query_param("email_address", email_address);
        }
        if let Some(include_total_count) = params.include_total_count {
            options = options.query_param("include_total_count", include_total_count.to_string());
        }
        if let Some(per_page) = params.per_page {
            options = options.query_param("per_page", per_page.to_string());
        }
        if let Some(sort_field) = params.sort_field {
            options = options.query_param("sort_field", sort_field);
        }
        if let Some(sort_order) = params.sort_order {
            options = options.query_param("sort_order", sort_order);
        }
        if let Some(status) = params.status {
            options = options.query_param("status", status);
        }
        if let Some(updated_after) = params.updated_after {
            options = options.query_param("updated_after", date_time_param(&updated_after));
        }
        if let Some(updated_before) = params.updated_before {
            options = options.query_param("updated_before", date_time_param(&updated_before));
        }

        decode_required(self.http.get("/subscribers", options).await?)
    }

    /// Creates a new subscriber.
    ///
    /// See <https://developers.kit.com/v4#create-a-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(
        &self,
        params: CreateSubscriberParams,
    ) -> Result<SubscriberResponse, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/subscribers", options).await?)
    }

    /// Returns a subscriber by their unique ID, or `None` if not found.
    ///
    /// See <https://developers.kit.com/v4#get-a-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get(&self, id: u64) -> Result<Option<SubscriberResponse>, ApiError> {
        decode_optional(
            self.http
                .get(&format!("/subscribers/{id}"), RequestOptions::new())
                .await?,
        )
    }

    /// Updates a subscriber's details. Returns `None` if the subscriber was
    /// not found.
    ///
    /// See <https://developers.kit.com/v4#update-a-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update(
        &self,
        id: u64,
        params: UpdateSubscriberParams,
    ) -> Result<Option<SubscriberResponse>, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_optional(self.http.put(&format!("/subscribers/{id}"), options).await?)
    }

    /// Unsubscribes the specified subscriber. Returns `None` if the
    /// subscriber was not found.
    ///
    /// See <https://developers.kit.com/v4#unsubscribe-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn unsubscribe(&self, id: u64) -> Result<Option<EmptyResponse>, ApiError> {
        decode_optional(
            self.http
                .post(
                    &format!("/subscribers/{id}/unsubscribe"),
                    RequestOptions::new(),
                )
                .await?,
        )
    }

    /// Returns the tags attached to a subscriber, or `None` if the
    /// subscriber does not exist.
    ///
    /// See <https://developers.kit.com/v4#list-tags-for-a-subscriber>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_tags(
        &self,
        id: u64,
        params: SubscriberTagsParams,
    ) -> Result<Option<SubscriberTags>, ApiError> {
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

        decode_optional(
            self.http
                .get(&format!("/subscribers/{id}/tags"), options)
                .await?,
        )
    }
}

/// A subscriber record.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Subscriber {
    pub id: u64,
    pub first_name: Option<String>,
    pub email_address: String,
    pub state: SubscriberState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Custom field values keyed by the field's key.
    #[serde(default)]
    pub fields: HashMap<String, Option<String>>,
}

/// Parameters for [`SubscribersHandler::bulk_create`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct BulkCreateSubscribersParams {
    /// The subscribers to create.
    pub subscribers: Vec<NewSubscriber>,
    /// URL notified after processing when the request runs asynchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// A subscriber to create in a bulk operation.
#[derive(Clone, Debug, Serialize)]
pub struct NewSubscriber {
    pub first_name: String,
    pub email_address: String,
    pub state: SubscriberState,
}

/// Outcome of a bulk subscriber creation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulkCreateSubscribers {
    /// The request ran synchronously.
    Synchronous {
        /// The subscribers that were created.
        subscribers: Vec<Subscriber>,
        /// Subscribers that could not be created, with the reasons.
        failures: Vec<SubscriberFailure>,
    },
    /// The request was queued for asynchronous processing.
    Asynchronous {},
}

/// A subscriber that failed to be created in a bulk operation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SubscriberFailure {
    pub subscriber: serde_json::Value,
    pub errors: Vec<String>,
}

/// Parameters for [`SubscribersHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListSubscribersParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Only subscribers created after this time.
    pub created_after: Option<DateTime<Utc>>,
    /// Only subscribers created before this time.
    pub created_before: Option<DateTime<Utc>>,
    /// Filter by an exact email address.
    pub email_address: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page (max 100).
    pub per_page: Option<u32>,
    /// Sort field: `id`, `updated_at`, or `cancelled_at`.
    pub sort_field: Option<String>,
    /// Sort order: `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Filter by state, or `all`. Defaults to `active` on the remote API.
    pub status: Option<String>,
    /// Only subscribers updated after this time.
    pub updated_after: Option<DateTime<Utc>>,
    /// Only subscribers updated before this time.
    pub updated_before: Option<DateTime<Utc>>,
}

/// A page of subscribers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListSubscribers {
    pub subscribers: Vec<Subscriber>,
    pub pagination: Pagination,
}

/// Parameters for [`SubscribersHandler::create`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateSubscriberParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SubscriberState>,
    /// Custom field values keyed by the field's key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, String>>,
}

/// Parameters for [`SubscribersHandler::update`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateSubscriberParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub email_address: String,
    /// Custom field values keyed by the field's key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, String>>,
}

/// A single subscriber wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubscriberResponse {
    pub subscriber: Subscriber,
}

/// Parameters for [`SubscribersHandler::get_tags`].
#[derive(Clone, Debug, Default)]
pub struct SubscriberTagsParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page.
    pub per_page: Option<u32>,
}

/// A tag as attached to a subscriber.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubscriberTag {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_at: Option<DateTime<Utc>>,
}

/// A page of tags attached to a subscriber.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubscriberTags {
    pub tags: Vec<SubscriberTag>,
    pub pagination: Pagination,
}
