//! Webhooks resource handler.
//!
//! Webhooks deliver HTTP POST notifications to a target URL when the
//! subscribed event occurs on the account.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{EmptyResponse, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Webhooks API endpoints.
///
/// Accessed via [`Kit::webhooks`](crate::Kit::webhooks).
#[derive(Clone, Copy, Debug)]
pub struct WebhooksHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> WebhooksHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns a paginated list of all webhooks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListWebhooksParams) -> Result<ListWebhooks, ApiError> {
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

        decode_required(self.http.get("/webhooks", options).await?)
    }

    /// Creates a new webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, params: CreateWebhookParams) -> Result<WebhookResponse, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/webhooks", options).await?)
    }

    /// Deletes a webhook. Returns `None` if the webhook was not found.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete(&self, id: u64) -> Result<Option<EmptyResponse>, ApiError> {
        decode_optional(
            self.http
                .delete(&format!("/webhooks/{id}"), RequestOptions::new())
                .await?,
        )
    }
}

/// Parameters for [`WebhooksHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListWebhooksParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// The event a webhook subscribes to.
///
/// Event names follow the remote API's `subscriber.tag_add` style. Some
/// events require an initiator: a `form_id` for `subscriber.form_subscribe`,
/// a `sequence_id` for `subscriber.course_subscribe`/`course_complete`, a
/// `tag_id` for `subscriber.tag_add`/`tag_remove`, an `initiator_value` URL
/// for `subscriber.link_click`, and a `product_id` for
/// `subscriber.product_purchase`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WebhookEvent {
    /// The event name, e.g. `subscriber.subscriber_activate`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiator_value: Option<String>,
}

/// Parameters for [`WebhooksHandler::create`].
#[derive(Clone, Debug, Serialize)]
pub struct CreateWebhookParams {
    /// The URL webhook payloads will be POSTed to.
    pub target_url: String,
    /// The event that triggers the webhook.
    pub event: WebhookEvent,
}

/// A webhook subscription.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Webhook {
    pub id: u64,
    pub account_id: u64,
    pub event: WebhookEvent,
    pub target_url: String,
}

/// A page of webhooks.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListWebhooks {
    pub webhooks: Vec<Webhook>,
    pub pagination: Pagination,
}

/// A single webhook wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct WebhookResponse {
    pub webhook: Webhook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_params_serialization() {
        let params = CreateWebhookParams {
            target_url: "https://example.com/hooks/kit".to_string(),
            event: WebhookEvent {
                name: "subscriber.tag_add".to_string(),
                tag_id: Some(42),
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["target_url"], "https://example.com/hooks/kit");
        assert_eq!(json["event"]["name"], "subscriber.tag_add");
        assert_eq!(json["event"]["tag_id"], 42);
        assert!(json["event"].get("form_id").is_none());
    }

    #[test]
    fn test_webhook_deserialization() {
        let json = r#"{
            "webhook": {
                "id": 9,
                "account_id": 1,
                "event": {"name": "subscriber.link_click", "initiator_value": "https://example.com"},
                "target_url": "https://example.com/hooks/kit"
            }
        }"#;

        let response: WebhookResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.webhook.event.name, "subscriber.link_click");
        assert_eq!(
            response.webhook.event.initiator_value.as_deref(),
            Some("https://example.com")
        );
    }
}
