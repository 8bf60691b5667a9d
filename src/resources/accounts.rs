//! Accounts resource handler.
//!
//! Covers the `/account` endpoints: the current account and its associated
//! user, brand colors, the creator profile, and email/growth statistics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, InvalidParamsError, RequestOptions};
use crate::resources::common::date_param;
use crate::resources::decode_required;

/// Handler for the Accounts API endpoints.
///
/// Accessed via [`Kit::accounts`](crate::Kit::accounts).
#[derive(Clone, Copy, Debug)]
pub struct AccountsHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> AccountsHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns the current account and associated user information.
    ///
    /// See <https://developers.kit.com/v4#get-current-account>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_current_account(&self) -> Result<CurrentAccountResponse, ApiError> {
        decode_required(self.http.get("/account", RequestOptions::new()).await?)
    }

    /// Returns the list of brand colors for the current account.
    ///
    /// See <https://developers.kit.com/v4#list-colors>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list_colors(&self) -> Result<ColorsResponse, ApiError> {
        decode_required(self.http.get("/account/colors", RequestOptions::new()).await?)
    }

    /// Updates and returns the newly set brand colors.
    ///
    /// The account supports between 1 and 5 hex colors; anything outside
    /// that range is rejected before the request is sent.
    ///
    /// See <https://developers.kit.com/v4#update-colors>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParams`] for an empty or oversized color
    /// list, or any other [`ApiError`] if the request fails.
    pub async fn update_colors(&self, colors: &[String]) -> Result<ColorsResponse, ApiError> {
        if colors.is_empty() {
            return Err(InvalidParamsError::EmptyColors.into());
        }
        if colors.len() > 5 {
            return Err(InvalidParamsError::TooManyColors.into());
        }

        let body = serde_json::to_string(&serde_json::json!({ "colors": colors }))?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.put("/account/colors", options).await?)
    }

    /// Returns the Creator Profile details.
    ///
    /// See <https://developers.kit.com/v4#get-creator-profile>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_creator_profile(&self) -> Result<CreatorProfileResponse, ApiError> {
        decode_required(
            self.http
                .get("/account/creator_profile", RequestOptions::new())
                .await?,
        )
    }

    /// Returns email stats for the last 90 days.
    ///
    /// See <https://developers.kit.com/v4#get-email-stats>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_email_stats(&self) -> Result<EmailStatsResponse, ApiError> {
        decode_required(
            self.http
                .get("/account/email_stats", RequestOptions::new())
                .await?,
        )
    }

    /// Returns growth stats for the provided starting and ending dates.
    ///
    /// The window defaults to the trailing 90 days on the remote API when
    /// either bound is omitted.
    ///
    /// See <https://developers.kit.com/v4#get-growth-stats>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get_growth_stats(
        &self,
        params: GrowthStatsParams,
    ) -> Result<GrowthStatsResponse, ApiError> {
        let mut options = RequestOptions::new();

        if let Some(starting) = params.starting {
            options = options.query_param("starting", date_param(starting));
        }
        if let Some(ending) = params.ending {
            options = options.query_param("ending", date_param(ending));
        }

        decode_required(self.http.get("/account/growth_stats", options).await?)
    }
}

/// Parameters for [`AccountsHandler::get_growth_stats`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GrowthStatsParams {
    /// Start of the reporting window. Defaults to 90 days ago.
    pub starting: Option<NaiveDate>,
    /// End of the reporting window. Defaults to today.
    pub ending: Option<NaiveDate>,
}

/// The current account and its associated user.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CurrentAccountResponse {
    /// The authenticated user.
    pub user: AccountUser,
}

/// The user that owns the current account.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AccountUser {
    /// The user's email address.
    pub email: String,
    /// The account attached to the user.
    pub account: Account,
}

/// Core account details.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Account {
    /// Display name of the account.
    pub name: String,
    /// The plan the account is on.
    pub plan_type: String,
    /// The primary sending address.
    pub primary_email_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<AccountTimezone>,
}

/// Timezone details attached to an account.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AccountTimezone {
    pub name: String,
    pub friendly_name: String,
    pub utc_offset: String,
}

/// Brand colors for the account, as hex strings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ColorsResponse {
    /// Up to 5 color hex codes.
    pub colors: Vec<String>,
}

/// The account's public Creator Profile.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreatorProfileResponse {
    pub profile: CreatorProfile,
}

/// Details shown on the Creator Profile page.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreatorProfile {
    pub name: String,
    pub byline: String,
    pub bio: String,
    pub image_url: String,
    pub profile_url: String,
}

/// Email statistics for the trailing window.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmailStatsResponse {
    pub stats: EmailStats,
}

/// Basic sending statistics.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmailStats {
    pub sent: u64,
    pub clicked: u64,
    pub opened: u64,
    /// Reporting mode, e.g. `last_90`.
    pub email_stats_mode: String,
    pub open_tracking_enabled: bool,
    pub click_tracking_enabled: bool,
    pub starting: String,
    pub ending: String,
}

/// Growth statistics for the requested window.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GrowthStatsResponse {
    pub stats: GrowthStats,
}

/// Subscriber growth over the requested window.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GrowthStats {
    pub cancellations: i64,
    pub net_new_subscribers: i64,
    pub new_subscribers: i64,
    pub subscribers: i64,
    pub starting: String,
    pub ending: String,
}
