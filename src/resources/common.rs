//! Shared types and helpers used across resource handlers.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Cursor-based pagination details returned by list endpoints.
///
/// Cursors are opaque: pass `end_cursor` back as the `after` parameter (or
/// `start_cursor` as `before`) on a subsequent call to move through pages.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Pagination {
    /// Whether a previous page exists.
    pub has_previous_page: bool,
    /// Whether a next page exists.
    pub has_next_page: bool,
    /// Cursor for the first record on this page.
    pub start_cursor: Option<String>,
    /// Cursor for the last record on this page.
    pub end_cursor: Option<String>,
    /// Number of records per page.
    pub per_page: u32,
    /// Total count of matching records. Only present when the request set
    /// `include_total_count=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// The lifecycle state of a subscriber.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberState {
    /// Subscribed and receiving emails.
    Active,
    /// Imported but not yet confirmed.
    Inactive,
    /// Delivery to the address failed permanently.
    Bounced,
    /// The subscriber marked an email as spam.
    Complained,
    /// Unsubscribed.
    Cancelled,
}

/// An intentionally empty response body.
///
/// Endpoints that acknowledge an action without returning data (deletes,
/// unsubscribes, tag removals) decode to this.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmptyResponse {}

/// Normalizes a timestamp into the ISO8601 form the remote API expects.
pub(crate) fn date_time_param(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalizes a calendar date into the `yyyy-mm-dd` form the remote API
/// expects for date-only filters.
pub(crate) fn date_param(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pagination_deserializes_without_total_count() {
        let json = r#"{
            "has_previous_page": false,
            "has_next_page": true,
            "start_cursor": "WzFd",
            "end_cursor": "WzI1XQ",
            "per_page": 25
        }"#;

        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert!(!pagination.has_previous_page);
        assert!(pagination.has_next_page);
        assert_eq!(pagination.start_cursor.as_deref(), Some("WzFd"));
        assert_eq!(pagination.per_page, 25);
        assert_eq!(pagination.total_count, None);
    }

    #[test]
    fn test_pagination_deserializes_null_cursors() {
        let json = r#"{
            "has_previous_page": false,
            "has_next_page": false,
            "start_cursor": null,
            "end_cursor": null,
            "per_page": 500,
            "total_count": 0
        }"#;

        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(pagination.start_cursor, None);
        assert_eq!(pagination.total_count, Some(0));
    }

    #[test]
    fn test_subscriber_state_serde_round_trip() {
        for (state, expected) in [
            (SubscriberState::Active, "\"active\""),
            (SubscriberState::Inactive, "\"inactive\""),
            (SubscriberState::Bounced, "\"bounced\""),
            (SubscriberState::Complained, "\"complained\""),
            (SubscriberState::Cancelled, "\"cancelled\""),
        ] {
            assert_eq!(serde_json::to_string(&state).unwrap(), expected);
            let parsed: SubscriberState = serde_json::from_str(expected).unwrap();
            assert_eq!(parsed, state);
        }
    }

    #[test]
    fn test_date_time_param_matches_iso8601_milliseconds() {
        let value = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        assert_eq!(date_time_param(&value), "2024-03-09T14:30:05.000Z");
    }

    #[test]
    fn test_date_param_is_year_month_day() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(date_param(value), "2024-03-09");
    }
}
