//! Integration tests for resource handlers.
//!
//! These tests verify that handlers map method calls to the right paths,
//! queries, and bodies, and cast responses to their typed shapes,
//! including the 404 → `None` mapping and the bulk synchronous /
//! asynchronous pass-through.

use chrono::{NaiveDate, TimeZone, Utc};
use kit_api::resources::subscribers::{
    BulkCreateSubscribers, BulkCreateSubscribersParams, CreateSubscriberParams,
    ListSubscribersParams, NewSubscriber, SubscriberTagsParams,
};
use kit_api::resources::tags::{BulkTaggingParams, ListTagsParams, Tagging};
use kit_api::resources::accounts::GrowthStatsParams;
use kit_api::resources::broadcasts::ListBroadcastsParams;
use kit_api::{ApiCredential, ApiError, BaseUrl, InvalidParamsError, Kit, KitConfig, SubscriberState};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the given mock server.
fn create_kit(server_uri: &str) -> Kit {
    let config = KitConfig::builder()
        .credential(ApiCredential::new("test-api-key").unwrap())
        .base_url(BaseUrl::new(server_uri).unwrap())
        .retry_delay_ms(10)
        .build()
        .unwrap();
    Kit::new(&config)
}

fn empty_pagination() -> serde_json::Value {
    serde_json::json!({
        "has_previous_page": false,
        "has_next_page": false,
        "start_cursor": null,
        "end_cursor": null,
        "per_page": 500
    })
}

// ============================================================================
// Subscribers
// ============================================================================

#[tokio::test]
async fn test_subscribers_list_builds_filter_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .and(query_param("email_address", "ada@example.com"))
        .and(query_param("status", "all"))
        .and(query_param("created_after", "2024-01-01T00:00:00.000Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscribers": [
                {
                    "id": 1,
                    "first_name": "Ada",
                    "email_address": "ada@example.com",
                    "state": "active",
                    "created_at": "2024-02-01T09:00:00Z",
                    "fields": {}
                }
            ],
            "pagination": empty_pagination()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let params = ListSubscribersParams {
        email_address: Some("ada@example.com".to_string()),
        status: Some("all".to_string()),
        created_after: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ..Default::default()
    };

    let page = kit.subscribers().list(params).await.unwrap();
    assert_eq!(page.subscribers.len(), 1);
    assert_eq!(page.subscribers[0].state, SubscriberState::Active);
}

#[tokio::test]
async fn test_subscribers_get_returns_none_for_missing_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribers/999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let result = kit.subscribers().get(999).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_subscribers_create_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscribers"))
        .and(body_json(serde_json::json!({
            "email_address": "new@example.com",
            "first_name": "New"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscriber": {
                "id": 7,
                "first_name": "New",
                "email_address": "new@example.com",
                "state": "active",
                "created_at": "2024-02-01T09:00:00Z",
                "fields": {}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let params = CreateSubscriberParams {
        email_address: "new@example.com".to_string(),
        first_name: Some("New".to_string()),
        ..Default::default()
    };

    let created = kit.subscribers().create(params).await.unwrap();
    assert_eq!(created.subscriber.id, 7);
}

#[tokio::test]
async fn test_subscribers_unsubscribe_returns_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/subscribers/7/unsubscribe"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let result = kit.subscribers().unsubscribe(7).await.unwrap();

    assert!(result.is_some());
}

#[tokio::test]
async fn test_subscribers_get_tags_passes_pagination_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscribers/7/tags"))
        .and(query_param("after", "WzI1XQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tags": [{"id": 3, "name": "Beginners", "tagged_at": "2024-01-05T10:00:00Z"}],
            "pagination": empty_pagination()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let params = SubscriberTagsParams {
        after: Some("WzI1XQ".to_string()),
        ..Default::default()
    };

    let tags = kit.subscribers().get_tags(7, params).await.unwrap().unwrap();
    assert_eq!(tags.tags[0].name, "Beginners");
}

#[tokio::test]
async fn test_subscribers_bulk_create_synchronous_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bulk/subscribers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscribers": [
                {
                    "id": 1,
                    "first_name": "Ada",
                    "email_address": "ada@example.com",
                    "state": "active",
                    "created_at": "2024-02-01T09:00:00Z"
                }
            ],
            "failures": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let params = BulkCreateSubscribersParams {
        subscribers: vec![NewSubscriber {
            first_name: "Ada".to_string(),
            email_address: "ada@example.com".to_string(),
            state: SubscriberState::Active,
        }],
        callback_url: None,
    };

    let outcome = kit.subscribers().bulk_create(params).await.unwrap();
    assert!(matches!(outcome, BulkCreateSubscribers::Synchronous { .. }));
}

#[tokio::test]
async fn test_subscribers_bulk_create_asynchronous_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bulk/subscribers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let params = BulkCreateSubscribersParams {
        subscribers: vec![NewSubscriber {
            first_name: "Ada".to_string(),
            email_address: "ada@example.com".to_string(),
            state: SubscriberState::Active,
        }],
        callback_url: Some("https://example.com/hook".to_string()),
    };

    let outcome = kit.subscribers().bulk_create(params).await.unwrap();
    assert!(matches!(outcome, BulkCreateSubscribers::Asynchronous {}));
}

// ============================================================================
// Tags
// ============================================================================

#[tokio::test]
async fn test_tags_list_and_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tags": [{"id": 1, "name": "Beginners", "created_at": "2023-06-01T10:00:00Z"}],
            "pagination": empty_pagination()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/tags"))
        .and(body_json(serde_json::json!({"name": "Advanced"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tag": {"id": 2, "name": "Advanced", "created_at": "2023-06-02T10:00:00Z"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());

    let listed = kit
        .tags()
        .list(ListTagsParams {
            per_page: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.tags[0].name, "Beginners");

    let created = kit.tags().create("Advanced").await.unwrap();
    assert_eq!(created.tag.id, 2);
}

#[tokio::test]
async fn test_tags_tag_and_remove_subscriber_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tags/3/subscribers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscriber": {
                "id": 7,
                "first_name": "Ada",
                "email_address": "ada@example.com",
                "state": "active",
                "tagged_at": "2024-01-05T10:00:00Z",
                "fields": {}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/tags/3/subscribers/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());

    let tagged = kit.tags().tag_subscriber(3, 7).await.unwrap().unwrap();
    assert!(tagged.subscriber.tagged_at.is_some());

    let removed = kit.tags().remove_subscriber(3, 7).await.unwrap();
    assert!(removed.is_some());
}

#[tokio::test]
async fn test_tags_remove_subscriber_returns_none_when_untagged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tags/3/subscribers/7"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let removed = kit.tags().remove_subscriber(3, 7).await.unwrap();

    assert!(removed.is_none());
}

#[tokio::test]
async fn test_tags_bulk_tag_sends_taggings_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bulk/tags/subscribers"))
        .and(body_json(serde_json::json!({
            "taggings": [
                {"tag_id": 1, "subscriber_id": 10},
                {"tag_id": 2, "subscriber_id": 20}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
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
        callback_url: None,
    };

    kit.tags().bulk_tag(params).await.unwrap();
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_accounts_growth_stats_formats_dates_as_year_month_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/growth_stats"))
        .and(query_param("starting", "2024-01-01"))
        .and(query_param("ending", "2024-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stats": {
                "cancellations": 5,
                "net_new_subscribers": 95,
                "new_subscribers": 100,
                "subscribers": 1000,
                "starting": "2024-01-01T00:00:00-05:00",
                "ending": "2024-03-31T23:59:59-04:00"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let params = GrowthStatsParams {
        starting: NaiveDate::from_ymd_opt(2024, 1, 1),
        ending: NaiveDate::from_ymd_opt(2024, 3, 31),
    };

    let stats = kit.accounts().get_growth_stats(params).await.unwrap();
    assert_eq!(stats.stats.subscribers, 1000);
}

#[tokio::test]
async fn test_accounts_update_colors_validates_bounds_client_side() {
    let mock_server = MockServer::start().await;
    let kit = create_kit(&mock_server.uri());

    let empty: Vec<String> = vec![];
    let error = kit.accounts().update_colors(&empty).await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::InvalidParams(InvalidParamsError::EmptyColors)
    ));

    let too_many: Vec<String> = (0..6).map(|i| format!("#00000{i}")).collect();
    let error = kit.accounts().update_colors(&too_many).await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::InvalidParams(InvalidParamsError::TooManyColors)
    ));

    // No request reached the server in either case.
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_accounts_update_colors_sends_put_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/account/colors"))
        .and(body_json(serde_json::json!({"colors": ["#ffffff"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"colors": ["#ffffff"]})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let colors = vec!["#ffffff".to_string()];
    let updated = kit.accounts().update_colors(&colors).await.unwrap();

    assert_eq!(updated.colors, colors);
}

// ============================================================================
// Broadcasts
// ============================================================================

#[tokio::test]
async fn test_broadcasts_zero_id_is_rejected_client_side() {
    let mock_server = MockServer::start().await;
    let kit = create_kit(&mock_server.uri());

    let error = kit.broadcasts().get(0).await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::InvalidParams(InvalidParamsError::InvalidResourceId { .. })
    ));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_broadcasts_list_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broadcasts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "broadcasts": [
                {"id": 12, "created_at": "2024-01-15T10:30:00Z", "subject": "Weekly digest", "public": true}
            ],
            "pagination": empty_pagination()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/broadcasts/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());

    let listed = kit
        .broadcasts()
        .list(ListBroadcastsParams::default())
        .await
        .unwrap();
    assert_eq!(listed.broadcasts[0].subject.as_deref(), Some("Weekly digest"));

    let deleted = kit.broadcasts().delete(12).await.unwrap();
    assert!(deleted.is_some());
}

// ============================================================================
// Forms and Sequences
// ============================================================================

#[tokio::test]
async fn test_forms_add_subscriber_by_email_includes_referrer_when_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/forms/5/subscribers"))
        .and(body_json(serde_json::json!({
            "email_address": "ada@example.com",
            "referrer": "https://blog.example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscriber": {
                "id": 7,
                "first_name": "Ada",
                "email_address": "ada@example.com",
                "state": "active",
                "fields": {}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let added = kit
        .forms()
        .add_subscriber_by_email(5, "ada@example.com", Some("https://blog.example.com"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(added.subscriber.email_address, "ada@example.com");
}

#[tokio::test]
async fn test_sequences_add_subscriber_by_id_posts_to_nested_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sequences/3/subscribers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscriber": {
                "id": 7,
                "first_name": "Ada",
                "email_address": "ada@example.com",
                "state": "active",
                "fields": {}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let added = kit
        .sequences()
        .add_subscriber_by_id(3, 7)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(added.subscriber.id, 7);
}

// ============================================================================
// Webhooks
// ============================================================================

#[tokio::test]
async fn test_webhooks_delete_returns_none_when_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/webhooks/9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let kit = create_kit(&mock_server.uri());
    let result = kit.webhooks().delete(9).await.unwrap();

    assert!(result.is_none());
}
