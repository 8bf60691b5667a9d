//! Custom fields resource handler.
//!
//! Custom fields collect subscriber information beyond the standard
//! `first_name` and `email_address` fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{EmptyResponse, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Custom Fields API endpoints.
///
/// Accessed via [`Kit::custom_fields`](crate::Kit::custom_fields).
#[derive(Clone, Copy, Debug)]
pub struct CustomFieldsHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> CustomFieldsHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates custom fields in bulk.
    ///
    /// For 100 or fewer fields the request runs synchronously and returns
    /// the created fields with any failures. Above that the remote API
    /// processes the request asynchronously and returns an empty response;
    /// provide a `callback_url` to be notified of the outcome.
    ///
    /// See <https://developers.kit.com/v4#bulk-create-custom-fields>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn bulk_create(
        &self,
        params: BulkCreateCustomFieldsParams,
    ) -> Result<BulkCreateCustomFields, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/bulk/custom_fields", options).await?)
    }

    /// Returns a paginated list of all custom fields on the account.
    ///
    /// See <https://developers.kit.com/v4#list-custom-fields>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListCustomFieldsParams) -> Result<ListCustomFields, ApiError> {
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

        decode_required(self.http.get("/custom_fields", options).await?)
    }

    /// Creates a custom field.
    ///
    /// The label must be unique to the account; surrounding whitespace is
    /// removed remotely. A `key` (lowercased, underscored ASCII) and a
    /// `name` (`ck_field`-prefixed form identifier) are generated from it.
    ///
    /// See <https://developers.kit.com/v4#create-a-custom-field>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, label: &str) -> Result<CustomFieldResponse, ApiError> {
        let body = serde_json::to_string(&serde_json::json!({ "label": label }))?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/custom_fields", options).await?)
    }

    /// Deletes a custom field, removing its data from all subscribers.
    /// Returns `None` if the field was not found.
    ///
    /// See <https://developers.kit.com/v4#delete-custom-field>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete(&self, id: u64) -> Result<Option<EmptyResponse>, ApiError> {
        decode_optional(
            self.http
                .delete(&format!("/custom_fields/{id}"), RequestOptions::new())
                .await?,
        )
    }

    /// Updates a custom field's label. Returns `None` if the field was not
    /// found.
    ///
    /// The key changes with the label but the name remains the same. An
    /// update breaks any liquid personalization tags that reference the old
    /// key.
    ///
    /// See <https://developers.kit.com/v4#update-a-custom-field>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update(
        &self,
        id: u64,
        label: &str,
    ) -> Result<Option<CustomFieldResponse>, ApiError> {
        let body = serde_json::to_string(&serde_json::json!({ "label": label }))?;
        let options = RequestOptions::new().body(body);

        decode_optional(self.http.put(&format!("/custom_fields/{id}"), options).await?)
    }
}

/// A custom field attached to the account.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CustomField {
    pub id: u64,
    /// `ck_field`-prefixed identifier for custom form HTML.
    pub name: String,
    /// Lowercased, underscored key used in personalization tags.
    pub key: String,
    /// The human-readable label.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for [`CustomFieldsHandler::bulk_create`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct BulkCreateCustomFieldsParams {
    /// The fields to create.
    pub custom_fields: Vec<NewCustomField>,
    /// URL notified after processing when the request runs asynchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// A field to create in a bulk operation.
#[derive(Clone, Debug, Serialize)]
pub struct NewCustomField {
    pub label: String,
}

/// Outcome of a bulk custom field creation.
///
/// The variant is determined by the response shape: a synchronous run
/// returns the created fields, an asynchronous run returns an empty body.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulkCreateCustomFields {
    /// The request ran synchronously.
    Synchronous {
        /// The fields that were created.
        custom_fields: Vec<CustomField>,
        /// Fields that could not be created, with the reasons.
        failures: Vec<CustomFieldFailure>,
    },
    /// The request was queued for asynchronous processing.
    Asynchronous {},
}

/// A custom field that failed to be created in a bulk operation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CustomFieldFailure {
    pub custom_field: serde_json::Value,
    pub errors: Vec<String>,
}

/// Parameters for [`CustomFieldsHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListCustomFieldsParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// A page of custom fields.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListCustomFields {
    pub custom_fields: Vec<CustomField>,
    pub pagination: Pagination,
}

/// A single custom field wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CustomFieldResponse {
    pub custom_field: CustomField,
}
