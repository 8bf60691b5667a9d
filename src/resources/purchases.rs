//! Purchases resource handler.
//!
//! Purchases record transactions attached to subscribers, typically pushed
//! from an external store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiError, HttpClient, RequestOptions};
use crate::resources::common::{date_time_param, Pagination};
use crate::resources::{decode_optional, decode_required};

/// Handler for the Purchases API endpoints.
///
/// Accessed via [`Kit::purchases`](crate::Kit::purchases).
#[derive(Clone, Copy, Debug)]
pub struct PurchasesHandler<'a> {
    http: &'a HttpClient,
}

impl<'a> PurchasesHandler<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Returns a paginated list of all purchases.
    ///
    /// See <https://developers.kit.com/api-reference/purchases/list-purchases>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self, params: ListPurchasesParams) -> Result<ListPurchases, ApiError> {
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

        decode_required(self.http.get("/purchases", options).await?)
    }

    /// Records a new purchase for a subscriber.
    ///
    /// See <https://developers.kit.com/api-reference/purchases/create-a-purchase>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn create(&self, params: CreatePurchaseParams) -> Result<PurchaseResponse, ApiError> {
        let body = serde_json::to_string(&CreatePurchaseBody {
            purchase: PurchaseBody::from_params(params),
        })?;
        let options = RequestOptions::new().body(body);

        decode_required(self.http.post("/purchases", options).await?)
    }

    /// Returns a purchase by its unique ID, or `None` if it was not found.
    ///
    /// See <https://developers.kit.com/api-reference/purchases/get-a-purchase>.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn get(&self, id: u64) -> Result<Option<PurchaseResponse>, ApiError> {
        decode_optional(
            self.http
                .get(&format!("/purchases/{id}"), RequestOptions::new())
                .await?,
        )
    }
}

/// Parameters for [`PurchasesHandler::list`].
#[derive(Clone, Debug, Default)]
pub struct ListPurchasesParams {
    /// Cursor to fetch records after (`pagination.end_cursor`).
    pub after: Option<String>,
    /// Cursor to fetch records before (`pagination.start_cursor`).
    pub before: Option<String>,
    /// Include the total count of records in the response.
    pub include_total_count: Option<bool>,
    /// Number of results per page. Default 500, maximum 1000.
    pub per_page: Option<u32>,
}

/// Parameters for [`PurchasesHandler::create`].
#[derive(Clone, Debug, Default)]
pub struct CreatePurchaseParams {
    /// The subscriber the purchase belongs to.
    pub email_address: String,
    /// The subscriber's first name.
    pub first_name: Option<String>,
    /// A unique ID for the purchase.
    pub transaction_id: String,
    /// Purchase status, e.g. `paid`.
    pub status: Option<String>,
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub shipping: Option<f64>,
    pub discount: Option<f64>,
    pub total: Option<f64>,
    /// The 3 letter currency code, e.g. `USD`.
    pub currency: String,
    /// When the transaction happened. Defaults to now on the remote API.
    pub transaction_time: Option<DateTime<Utc>>,
    /// The line items of the purchase.
    pub products: Vec<PurchaseProductParams>,
}

/// A line item in a purchase being created.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PurchaseProductParams {
    /// The product name displayed to the subscriber.
    pub name: String,
    /// Your identifier for the product; variants share a `pid`.
    pub pid: String,
    /// Unique line item identifier within this purchase.
    pub lid: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub unit_price: f64,
}

/// Wire shape for the create-purchase body.
#[derive(Serialize)]
struct CreatePurchaseBody {
    purchase: PurchaseBody,
}

#[derive(Serialize)]
struct PurchaseBody {
    email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<f64>,
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_time: Option<String>,
    products: Vec<PurchaseProductParams>,
}

impl PurchaseBody {
    fn from_params(params: CreatePurchaseParams) -> Self {
        Self {
            email_address: params.email_address,
            first_name: params.first_name,
            transaction_id: params.transaction_id,
            status: params.status,
            subtotal: params.subtotal,
            tax: params.tax,
            shipping: params.shipping,
            discount: params.discount,
            total: params.total,
            currency: params.currency,
            transaction_time: params.transaction_time.as_ref().map(date_time_param),
            products: params.products,
        }
    }
}

/// A recorded purchase.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Purchase {
    pub id: u64,
    pub transaction_id: String,
    pub status: String,
    pub email_address: String,
    pub currency: String,
    pub transaction_time: String,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
    pub products: Vec<PurchaseProduct>,
}

/// A line item in a recorded purchase.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PurchaseProduct {
    pub quantity: u32,
    pub lid: String,
    pub unit_price: f64,
    pub sku: Option<String>,
    pub name: String,
    pub pid: String,
}

/// A single purchase wrapped in its response envelope.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PurchaseResponse {
    pub purchase: Purchase,
}

/// A page of purchases.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ListPurchases {
    pub purchases: Vec<Purchase>,
    pub pagination: Pagination,
}
