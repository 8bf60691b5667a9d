//! # Kit API Rust SDK
//!
//! A Rust SDK for the [Kit](https://kit.com) (formerly ConvertKit) v4 API,
//! providing type-safe configuration, authenticated HTTP access with
//! automatic retries, and typed handlers for every resource area.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`KitConfig`] and [`KitConfigBuilder`]
//! - Validated newtypes for the API credential and base URL
//! - An async HTTP client with exponential-backoff retry and jitter for
//!   transient failures (5xx, 429, network errors)
//! - A structural error taxonomy ([`ApiError`]): retry eligibility is
//!   decided by variant, never by message text
//! - Typed resource handlers for accounts, broadcasts, custom fields,
//!   email templates, forms, purchases, segments, sequences, subscribers,
//!   tags, and webhooks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kit_api::{ApiCredential, Kit, KitConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = KitConfig::builder()
//!     .credential(ApiCredential::new("your-api-key")?)
//!     .build()?;
//!
//! let kit = Kit::new(&config);
//!
//! let account = kit.accounts().get_current_account().await?;
//! println!("Signed in as {}", account.user.email);
//! # Ok(())
//! # }
//! ```
//!
//! ## Absence vs. failure
//!
//! Endpoints that look up a specific record return `Result<Option<T>, _>`:
//! a 404 from the API becomes `Ok(None)`, not an error.
//!
//! ```rust,no_run
//! # use kit_api::{ApiCredential, Kit, KitConfig};
//! # async fn run(kit: Kit) -> Result<(), Box<dyn std::error::Error>> {
//! match kit.subscribers().get(123).await? {
//!     Some(found) => println!("{}", found.subscriber.email_address),
//!     None => println!("no subscriber with that id"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Retry behavior
//!
//! Each call makes up to `max_retries + 1` attempts. Responses with status
//! 429 or 5xx and transport-level failures are retried after an
//! exponentially growing, jittered delay; all other failures surface
//! immediately. The wait suspends only the calling task, so concurrent
//! calls through the same client are unaffected.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based; the `KIT_API_KEY`
//!   environment fallback is read once at construction and never lazily
//! - **Fail-fast validation**: newtypes and the config builder validate on
//!   construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **Payload-agnostic core**: the engine decodes generic JSON; each
//!   handler validates the shape it expects at the edge

pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use clients::{ApiError, HttpClient, HttpMethod, InvalidParamsError, RequestOptions};
pub use config::{ApiCredential, AuthMode, BaseUrl, KitConfig, KitConfigBuilder};
pub use error::ConfigError;
pub use resources::{EmptyResponse, Pagination, SubscriberState};

use resources::accounts::AccountsHandler;
use resources::broadcasts::BroadcastsHandler;
use resources::custom_fields::CustomFieldsHandler;
use resources::email_templates::EmailTemplatesHandler;
use resources::forms::FormsHandler;
use resources::purchases::PurchasesHandler;
use resources::segments::SegmentsHandler;
use resources::sequences::SequencesHandler;
use resources::subscribers::SubscribersHandler;
use resources::tags::TagsHandler;
use resources::webhooks::WebhooksHandler;

/// The Kit API client.
///
/// Owns one [`HttpClient`] configured from a [`KitConfig`] and exposes a
/// handler per resource area. The client is cheap to share: handlers borrow
/// the underlying HTTP client, and any number of calls may be in flight
/// concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use kit_api::{ApiCredential, Kit, KitConfig};
/// use kit_api::resources::tags::ListTagsParams;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = KitConfig::builder()
///     .credential(ApiCredential::new("your-api-key")?)
///     .build()?;
/// let kit = Kit::new(&config);
///
/// let tags = kit.tags().list(ListTagsParams::default()).await?;
/// for tag in tags.tags {
///     println!("{}: {}", tag.id, tag.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Kit {
    http: HttpClient,
}

impl Kit {
    /// Creates a new client from the given configuration.
    #[must_use]
    pub fn new(config: &KitConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Returns the underlying HTTP client.
    ///
    /// Useful for calling endpoints this SDK does not yet model.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the Accounts handler.
    #[must_use]
    pub const fn accounts(&self) -> AccountsHandler<'_> {
        AccountsHandler::new(&self.http)
    }

    /// Returns the Broadcasts handler.
    #[must_use]
    pub const fn broadcasts(&self) -> BroadcastsHandler<'_> {
        BroadcastsHandler::new(&self.http)
    }

    /// Returns the Custom Fields handler.
    #[must_use]
    pub const fn custom_fields(&self) -> CustomFieldsHandler<'_> {
        CustomFieldsHandler::new(&self.http)
    }

    /// Returns the Email Templates handler.
    #[must_use]
    pub const fn email_templates(&self) -> EmailTemplatesHandler<'_> {
        EmailTemplatesHandler::new(&self.http)
    }

    /// Returns the Forms handler.
    #[must_use]
    pub const fn forms(&self) -> FormsHandler<'_> {
        FormsHandler::new(&self.http)
    }

    /// Returns the Purchases handler.
    #[must_use]
    pub const fn purchases(&self) -> PurchasesHandler<'_> {
        PurchasesHandler::new(&self.http)
    }

    /// Returns the Segments handler.
    #[must_use]
    pub const fn segments(&self) -> SegmentsHandler<'_> {
        SegmentsHandler::new(&self.http)
    }

    /// Returns the Sequences handler.
    #[must_use]
    pub const fn sequences(&self) -> SequencesHandler<'_> {
        SequencesHandler::new(&self.http)
    }

    /// Returns the Subscribers handler.
    #[must_use]
    pub const fn subscribers(&self) -> SubscribersHandler<'_> {
        SubscribersHandler::new(&self.http)
    }

    /// Returns the Tags handler.
    #[must_use]
    pub const fn tags(&self) -> TagsHandler<'_> {
        TagsHandler::new(&self.http)
    }

    /// Returns the Webhooks handler.
    #[must_use]
    pub const fn webhooks(&self) -> WebhooksHandler<'_> {
        WebhooksHandler::new(&self.http)
    }
}

// Verify Kit is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Kit>();
};
