//! HTTP client for Kit API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Kit API with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::clients::errors::ApiError;
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::config::KitConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Kit API.
///
/// The client owns the full lifecycle of a single logical API call:
///
/// - URL assembly from the configured base URL, path, and query parameters
/// - Header merging (defaults, then auth headers, then per-call headers)
/// - Dispatch and response classification
/// - Automatic retry with exponential backoff and jitter for transient
///   failures (5xx, 429, and network errors)
/// - Translation of failure statuses into [`ApiError`] variants
///
/// Responses are decoded generically to [`serde_json::Value`]; callers cast
/// the value to the shape they expect. A 404 response decodes to `None`
/// rather than an error, and a 204 response yields an empty object without
/// touching the body.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds no mutable state, so any number
/// of calls may be in flight concurrently. The retry wait suspends only the
/// calling task.
///
/// # Example
///
/// ```rust,ignore
/// use kit_api::clients::{HttpClient, RequestOptions};
/// use kit_api::{ApiCredential, KitConfig};
///
/// let config = KitConfig::builder()
///     .credential(ApiCredential::new("my-api-key")?)
///     .build()?;
/// let client = HttpClient::new(&config);
///
/// let account = client.get("/account", RequestOptions::new()).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Normalized base URL (trailing slash stripped).
    base_url: String,
    /// Maximum retry attempts for transient failures.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    retry_delay_ms: u64,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use kit_api::clients::HttpClient;
    /// use kit_api::{ApiCredential, KitConfig};
    ///
    /// let config = KitConfig::builder()
    ///     .credential(ApiCredential::new("my-api-key").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// ```
    #[must_use]
    pub fn new(config: &KitConfig) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("Kit API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        // Auth headers are derived purely from the configured mode and sit
        // above the defaults, below per-call headers.
        default_headers.extend(config.auth_headers());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().as_ref().to_string(),
            max_retries: config.max_retries(),
            retry_delay_ms: config.retry_delay_ms(),
            default_headers,
        }
    }

    /// Returns the normalized base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Option<Value>, ApiError> {
        self.request(HttpMethod::Get, path, options).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>, ApiError> {
        self.request(HttpMethod::Post, path, options).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Option<Value>, ApiError> {
        self.request(HttpMethod::Put, path, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>, ApiError> {
        self.request(HttpMethod::Delete, path, options).await
    }

    /// Executes one logical API call to completion.
    ///
    /// Transient failures (network errors, 5xx responses, and 429 responses)
    /// are retried up to the configured maximum, waiting between attempts
    /// with exponential backoff and jitter. All other failure statuses are
    /// translated immediately. A 404 yields `Ok(None)`; a 204 yields an
    /// empty object without decoding the body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when:
    /// - the transport fails and retries are exhausted (`Transport`)
    /// - the API answers with a failure status (`AuthenticationFailed`,
    ///   `InvalidRequest`, `RateLimited`, `ServerError`, `Unknown`)
    /// - a successful response body is not valid JSON (`Decode`)
    ///
    /// Whichever failure triggered the final attempt is the one surfaced;
    /// intermediate attempt failures are never visible to the caller.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>, ApiError> {
        let url = build_url(&self.base_url, path, options.query());

        let mut headers = self.default_headers.clone();
        for (key, value) in options.headers() {
            headers.insert(key.clone(), value.clone());
        }

        let mut attempt: u32 = 0;
        loop {
            let result = self
                .dispatch(method, &url, &headers, options.body_ref())
                .await;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if (200..300).contains(&status) {
                        // 204 carries no body; decoding it as JSON would fail.
                        if status == 204 {
                            return Ok(Some(Value::Object(serde_json::Map::new())));
                        }
                        let text = response.text().await.map_err(ApiError::Transport)?;
                        let value = serde_json::from_str(&text)?;
                        return Ok(Some(value));
                    }

                    // Absence signal, never retried.
                    if status == 404 {
                        return Ok(None);
                    }

                    let retryable = status >= 500 || status == 429;
                    if retryable && attempt < self.max_retries {
                        self.wait_before_retry(attempt, &url, Some(status)).await;
                        attempt += 1;
                        continue;
                    }

                    if retryable {
                        tracing::warn!(%url, status, tries = attempt + 1, "retries exhausted");
                    }

                    let text = response.text().await.unwrap_or_default();
                    let detail = extract_detail(status, &text);
                    return Err(ApiError::from_status(status, detail));
                }
                Err(error) => {
                    if attempt < self.max_retries {
                        self.wait_before_retry(attempt, &url, None).await;
                        attempt += 1;
                        continue;
                    }
                    tracing::warn!(%url, tries = attempt + 1, "retries exhausted");
                    return Err(ApiError::Transport(error));
                }
            }
        }
    }

    /// Issues a single attempt over the wire.
    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut builder = self.client.request(method.as_reqwest(), url);

        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        builder.send().await
    }

    /// Suspends the calling task for the backoff delay before a retry.
    async fn wait_before_retry(&self, attempt: u32, url: &str, status: Option<u16>) {
        let delay = backoff_delay(self.retry_delay_ms, attempt);
        tracing::debug!(
            %url,
            attempt,
            status,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "retrying request"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Joins the base URL and path with exactly one separator and appends the
/// encoded query string when it is non-empty.
///
/// Normalization is idempotent: leading/trailing slash variation on either
/// side never produces doubled or missing separators.
pub(crate) fn build_url(base_url: &str, path: &str, query: &[(String, String)]) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    let mut url = format!("{base}/{path}");

    if !query.is_empty() {
        let encoded = query
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&encoded);
    }

    url
}

/// Computes the jittered exponential backoff delay for the attempt about to
/// be retried.
///
/// The base delay doubles with each attempt (`base * 2^attempt`) and is then
/// perturbed by `delay * 0.25 * uniform(-0.5, 0.5)` to avoid synchronized
/// retry storms, floored to whole milliseconds.
pub(crate) fn backoff_delay(base_delay_ms: u64, attempt: u32) -> Duration {
    let exponential = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let delay_ms = {
        let jitter = exponential as f64 * 0.25 * rand::thread_rng().gen_range(-0.5..=0.5);
        (exponential as f64 + jitter).floor().max(0.0) as u64
    };

    Duration::from_millis(delay_ms)
}

/// Extracts a human-readable detail string from a failure response body.
///
/// The body text is buffered, so the JSON parse and the raw-text fallback
/// read the same bytes. For 4xx responses whose parsed body carries an
/// array `errors` field, the entries are joined into an `Errors:` summary;
/// any other parseable body is stringified whole. Unparseable bodies fall
/// back to the raw text.
pub(crate) fn extract_detail(status: u16, text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => {
            if (400..500).contains(&status) {
                if let Some(errors) = parsed.get("errors").and_then(Value::as_array) {
                    let joined = errors
                        .iter()
                        .map(|entry| match entry {
                            Value::String(message) => message.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    return format!("Errors: {joined}");
                }
            }
            parsed.to_string()
        }
        Err(_) => text.to_string(),
    }
}
