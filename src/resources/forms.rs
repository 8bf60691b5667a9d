//! Forms resource handler.
//!
//! Covers forms and landing pages (embedded and hosted): listing,
//! inspecting their subscribers, and adding subscribers individually or in
//! bulk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{date_time_param, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Forms API endpoints.
///
/// Accessed via [`Kit::forms`](crate::Kit::forms).
#[derive(Clone, Copy, Debug)]
pub struct FormsHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> FormsHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Adds subscribers to forms in bulk.
    ///
    /// For 100 or fewer additions the request runs synchronously and
    /// returns the affected subscribers with any failures. Above that the
    /// remote API processes the request asynchronously and returns an empty
    /// response; provide a `callback_url` to be notified of failures.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn bulk_add_subscribers(
        &self,
        params: BulkAddFormSubscribersParams,
    ) -> Result<BulkAddFormSubscribers, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/bulk/forms/subscribers", options).await?)
    }

    /// Returns a paginated list of all forms and landing pages for the
    /// account, including active and archived ones.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListFormsParams) -> Result<ListForms, ApiError> {
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
        if let Some(status) = params.status {
            options = options.query_param("status", status);
        }
        if let Some(kind) = params.kind {
            options = options.query_param("type", kind);
        }

        decode_required(self.http.get("/forms", options).await?)
    }

    /// Returns a paginated list of subscribers attached to a form, or
    /// `None` if the form does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_subscribers(
        &self,
        id: u64,
        params: ListFormSubscribersParams,
    ) -> Result<Option<ListFormSubscribers>, ApiError> {
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
                .get(&format!("/forms/{id}/subscribers"), options)
                .await?,
        )
    }

    /// Adds a subscriber to a form by email address, or returns `None` if
    /// the form does not exist.
    ///
    /// The email address must already belong to a subscriber on the
    /// account, otherwise the call fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn add_subscriber_by_email(
        &self,
        id: u64,
        email_address: &str,
        referrer: Option<&str>,
    ) -> Result<Option<FormSubscriberResponse>, ApiError> {
        let mut payload = serde_json::Map::new();
        payload.insert(
            "email_address".to_string(),
            serde_json::Value::String(email_address.to_string()),
        );
        if let Some(referrer) = referrer {
            payload.insert(
                "referrer".to_string(),
                serde_json::Value::String(referrer.to_string()),
            );
        }

        let body = serde_json::to_string(&payload)?;
        let options = RequestOptions::new().body(body);

        decode_optional(
            self.http
                .post(&format!("/forms/{id}/subscribers"), options)
                .await?,
        )
    }

    /// Adds a subscriber to a form by their unique ID, or returns `None` if
    /// the form or subscriber does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn add_subscriber(
        &self,
        id: u64,
        subscriber_id: u64,
        referrer: Option<&str>,
    ) -> Result<Option<FormSubscriberResponse>, ApiError> {
        let mut payload = serde_json::Map::new();
        if let Some(referrer) = referrer {
            payload.insert(
                "referrer".to_string(),
                serde_json::Value::String(referrer.to_string()),
            );
        }

        let body = serde_json::to_string(&payload)?;
        let options = RequestOptions::new().body(body);

        decode_optional(
            self.http
                .post(&format!("/forms/{id}/subscribers/{subscriber_id}"), options)
                .await?,
        )
    }
}

/// Parameters for [`FormsHandler::bulk_add_subscribers`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct BulkAddFormSubscribersParams {
    /// The form/subscriber combinations to add.
    pub additions: Vec<FormSubscription>,
    /// URL notified after processing when the request runs asynchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// One form/subscriber combination in a bulk addition.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct FormSubscription {
    pub form_id: u64,
    pub subscriber_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// Outcome of a bulk form subscription.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulkAddFormSubscribers {
    /// The request ran synchronously.
    Synchronous {
        /// The subscribers that were added.
        subscribers: Vec<FormSubscriber>,
        /// Additions that could not be processed, with the reasons.
        failures: Vec<FormSubscriptionFailure>,
    },
    /// The request was queued for asynchronous processing.
    Asynchronous {},
}

/// A failed addition in a bulk form subscription.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FormSubscriptionFailure {
    pub errors: Vec<String>,
    pub subscription: serde_json::Value,
}

/// Parameters for [`FormsHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListFormsParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
    /// Filter by status: `active`, `archived`, `trashed`, or `all`.
    /// Defaults to `active` on the remote API.
    pub status: Option<String>,
    /// Filter by type: `embed` for embedded forms, `hosted` for landing
    /// pages.
    pub kind: Option<String>,
}

/// Parameters for [`FormsHandler::list_subscribers`].
#[derive(Clone, Debug, Default)]
pub struct ListFormSubscribersParams {
    /// Only subscribers added to the form after this time.
    pub added_after: Option<DateTime<Utc>>,
    /// Only subscribers added to the form before this time.
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

/// A form or landing page.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Form {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// `embed` or `hosted`.
    #[serde(rename = "type")]
    pub kind: String,
    pub format: Option<String>,
    pub embed_js: String,
    pub embed_url: String,
    pub archived: bool,
    pub uid: String,
}

/// A page of forms.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListForms {
    pub forms: Vec<Form>,
    pub pagination: Pagination,
}

/// UTM parameters parsed from a referring URL.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReferrerUtmParameters {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub term: String,
    pub content: String,
}

/// A subscriber as attached to a form.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct FormSubscriber {
    pub id: u64,
    pub first_name: Option<String>,
    pub email_address: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: HashMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer_utm_parameters: Option<ReferrerUtmParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// A page of subscribers attached to a form.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListFormSubscribers {
    pub subscribers: Vec<FormSubscriber>,
    pub pagination: Pagination,
}

/// A single form subscriber wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct FormSubscriberResponse {
    pub subscriber: FormSubscriber,
}
