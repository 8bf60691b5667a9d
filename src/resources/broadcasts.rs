//! Broadcasts resource handler.
//!
//! Broadcasts are one-off emails sent to all or a subset of subscribers.
//! This handler covers listing, drafting/scheduling, updating, deleting,
//! and the stats/link-click reporting endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, InvalidParamsError, RequestOptions};
use crate::resources::common::{EmptyResponse, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Broadcasts API endpoints.
///
/// Accessed via [`Kit::broadcasts`](crate::Kit::broadcasts).
#[derive(Clone, Copy, Debug)]
pub struct BroadcastsHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> BroadcastsHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns a paginated list of all broadcasts for the account,
    /// including draft, scheduled, and already sent ones.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/list-broadcasts>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListBroadcastsParams) -> Result<ListBroadcasts, ApiError> {
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

        decode_required(self.http.get("/broadcasts", options).await?)
    }

    /// Drafts or schedules a broadcast.
    ///
    /// To save a draft, leave `send_at` unset. To publish to the web, set
    /// `public` to `true`. To schedule for sending, provide a `send_at`
    /// timestamp; scheduled broadcasts should contain a subject and content
    /// at a minimum.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/create-a-broadcast>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, params: BroadcastParams) -> Result<BroadcastResponse, ApiError> {
        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/broadcasts", options).await?)
    }

    /// Returns the stats for all broadcasts on the account.
    ///
    /// This endpoint requires either a Pro level plan or developer
    /// authorization.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/get-stats-for-a-list-of-broadcasts>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_all_stats(&self) -> Result<AllBroadcastStats, ApiError> {
        decode_required(self.http.get("/broadcasts/stats", RequestOptions::new()).await?)
    }

    /// Returns the link clicks for a broadcast, or `None` if the broadcast
    /// does not exist.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/get-link-clicks-for-a-broadcast>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParams`] for a zero id, or any other
    /// [`ApiError`] if the request fails.
    pub async fn get_link_clicks(&self, id: u64) -> Result<Option<BroadcastClicks>, ApiError> {
        validate_id(id)?;

        decode_optional(
            self.http
                .get(&format!("/broadcasts/{id}/clicks"), RequestOptions::new())
                .await?,
        )
    }

    /// Returns the stats for a single broadcast, or `None` if the broadcast
    /// does not exist.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/get-stats-for-a-broadcast>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParams`] for a zero id, or any other
    /// [`ApiError`] if the request fails.
    pub async fn get_stats(&self, id: u64) -> Result<Option<SingleBroadcastStats>, ApiError> {
        validate_id(id)?;

        decode_optional(
            self.http
                .get(&format!("/broadcasts/{id}/stats"), RequestOptions::new())
                .await?,
        )
    }

    /// Deletes a broadcast. Returns `None` if the broadcast was not found.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/delete-a-broadcast>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParams`] for a zero id, or any other
    /// [`ApiError`] if the request fails.
    pub async fn delete(&self, id: u64) -> Result<Option<EmptyResponse>, ApiError> {
        validate_id(id)?;

        decode_optional(
            self.http
                .delete(&format!("/broadcasts/{id}"), RequestOptions::new())
                .await?,
        )
    }

    /// Returns a broadcast by its unique ID, or `None` if it was not found.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/get-a-broadcast>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParams`] for a zero id, or any other
    /// [`ApiError`] if the request fails.
    pub async fn get(&self, id: u64) -> Result<Option<BroadcastResponse>, ApiError> {
        validate_id(id)?;

        decode_optional(
            self.http
                .get(&format!("/broadcasts/{id}"), RequestOptions::new())
                .await?,
        )
    }

    /// Updates an existing broadcast. Returns `None` if the broadcast was
    /// not found.
    ///
    /// See <https://developers.kit.com/api-reference/broadcasts/update-a-broadcast>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParams`] for a zero id, or any other
    /// [`ApiError`] if the request fails.
    pub async fn update(
        &self,
        id: u64,
        params: BroadcastParams,
    ) -> Result<Option<BroadcastResponse>, ApiError> {
        validate_id(id)?;

        let body = serde_json::to_string(&params)?;
        let options = RequestOptions::new().body(body);

        decode_optional(self.http.put(&format!("/broadcasts/{id}"), options).await?)
    }
}

/// Rejects the zero ID the remote API treats as invalid.
fn validate_id(id: u64) -> Result<(), InvalidParamsError> {
    if id == 0 {
        return Err(InvalidParamsError::InvalidResourceId {
            resource: "broadcast",
        });
    }
    Ok(())
}

/// Parameters for [`BroadcastsHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListBroadcastsParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// Writable broadcast fields, shared by create and update.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BroadcastParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// The HTML content of the email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the broadcast is published to the web.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// When to send the broadcast. Leave unset to save a draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Targeting based on segment or tag ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_filter: Option<Vec<SubscriberFilterGroup>>,
}

/// One group of subscriber filter conditions.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubscriberFilterGroup {
    /// Conditions that must all match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<FilterCondition>>,
    /// Conditions of which any may match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<FilterCondition>>,
    /// Conditions that must not match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub none: Option<Vec<FilterCondition>>,
}

/// A single subscriber filter condition.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct FilterCondition {
    /// The condition type, e.g. `segment` or `tag`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The ids the condition applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,
}

/// A broadcast with its attached details.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Broadcast {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_template: Option<EmailTemplateRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_filter: Option<Vec<SubscriberFilterGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_id: Option<u64>,
}

/// The email template a broadcast uses.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmailTemplateRef {
    pub id: u64,
    pub name: String,
}

/// A single broadcast wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BroadcastResponse {
    pub broadcast: Broadcast,
}

/// A page of broadcasts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListBroadcasts {
    pub broadcasts: Vec<Broadcast>,
    pub pagination: Pagination,
}

/// Delivery and engagement statistics for a broadcast.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BroadcastStats {
    pub recipients: u64,
    pub open_rate: f64,
    pub emails_opened: u64,
    pub click_rate: f64,
    pub unsubscribe_rate: f64,
    pub unsubscribes: u64,
    pub total_clicks: u64,
    pub show_total_clicks: bool,
    /// Sending status, e.g. `draft` or `completed`.
    pub status: String,
    /// Sending progress percentage.
    pub progress: f64,
    pub open_tracking_disabled: bool,
    pub click_tracking_disabled: bool,
}

/// A broadcast id paired with its stats.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BroadcastWithStats {
    pub id: u64,
    pub stats: BroadcastStats,
}

/// Stats for every broadcast on the account.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AllBroadcastStats {
    pub broadcasts: Vec<BroadcastWithStats>,
}

/// Stats for a single broadcast.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SingleBroadcastStats {
    pub broadcast: BroadcastWithStats,
}

/// Click counts for one link in a broadcast.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LinkClick {
    pub url: String,
    pub unique_clicks: u64,
    pub click_to_delivery_rate: f64,
    pub click_to_open_rate: f64,
}

/// Link clicks for a broadcast.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BroadcastClicks {
    pub broadcast: BroadcastClicksInner,
}

/// The broadcast id with its per-link click counts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BroadcastClicksInner {
    pub id: u64,
    pub clicks: Vec<LinkClick>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_params_skip_unset_fields() {
        let params = BroadcastParams {
            subject: Some("Hello".to_string()),
            content: Some("<p>Hi</p>".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["subject"], "Hello");
        assert_eq!(json["content"], "<p>Hi</p>");
        assert!(json.get("send_at").is_none());
        assert!(json.get("public").is_none());
    }

    #[test]
    fn test_broadcast_deserialization() {
        let json = r#"{
            "id": 12,
            "created_at": "2024-01-15T10:30:00Z",
            "subject": "Weekly digest",
            "public": true,
            "email_address": null,
            "email_template": {"id": 3, "name": "Classic"},
            "subscriber_filter": [
                {"all": [{"type": "segment", "ids": [1, 2]}]}
            ]
        }"#;

        let broadcast: Broadcast = serde_json::from_str(json).unwrap();
        assert_eq!(broadcast.id, 12);
        assert!(broadcast.public);
        assert_eq!(broadcast.email_template.unwrap().name, "Classic");
        let filter = broadcast.subscriber_filter.unwrap();
        assert_eq!(filter[0].all.as_ref().unwrap()[0].kind, "segment");
    }

    #[test]
    fn test_subscriber_filter_condition_kind_renames_to_type() {
        let condition = FilterCondition {
            kind: "tag".to_string(),
            ids: Some(vec![7]),
        };
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["type"], "tag");
        assert!(json.get("kind").is_none());
    }
}
