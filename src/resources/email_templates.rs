//! Email templates resource handler.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::Pagination;
use crate::resources::decode_required;

/// Handler for the Email Templates API endpoints.
///
/// Accessed via [`Kit::email_templates`](crate::Kit::email_templates).
#[derive(Clone, Copy, Debug)]
pub struct EmailTemplatesHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> EmailTemplatesHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns a paginated list of all email templates.
    ///
    /// See <https://developers.kit.com/v4#list-email-templates>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(
        &self,
        params: ListEmailTemplatesParams,
    ) -> Result<ListEmailTemplates, ApiError> {
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

        decode_required(self.http.get("/email_templates", options).await?)
    }
}

/// Parameters for [`EmailTemplatesHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListEmailTemplatesParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// An email template on the account.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmailTemplate {
    pub id: u64,
    pub name: String,
    /// Whether this is the account's default template.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub category: Option<String>,
}

/// A page of email templates.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListEmailTemplates {
    pub email_templates: Vec<EmailTemplate>,
    pub pagination: Pagination,
}
