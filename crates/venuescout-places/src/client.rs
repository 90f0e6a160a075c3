//! HTTP client for the places web service.
//!
//! Wraps `reqwest` with API key handling, typed response deserialization and
//! retry. Every response's `status` field is checked; anything other than
//! `OK` or `ZERO_RESULTS` surfaces as [`PlacesError::ApiStatus`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{DetailsResponse, Place, PlaceDetail, TextSearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Detail fields requested for every place.
pub const DETAIL_FIELDS: &str = "name,formatted_phone_number,website,formatted_address,url";

/// Maximum number of pages to follow for one query.
///
/// The service stops handing out tokens after three pages; this only guards
/// against a token that keeps cycling.
const MAX_PAGES: usize = 10;

/// Retry settings for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    /// Base delay for exponential back-off, in milliseconds.
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base_ms: 1_000,
        }
    }
}

/// Client for the places web service.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
    page_token_delay: Duration,
}

impl PlacesClient {
    /// Creates a new client pointed at the production service.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("venuescout/0.1 (venue-discovery)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            retry: RetryPolicy::default(),
            page_token_delay: Duration::from_secs(2),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the wait applied before a `next_page_token` is used.
    #[must_use]
    pub fn with_page_token_delay(mut self, delay: Duration) -> Self {
        self.page_token_delay = delay;
        self
    }

    /// Runs a text search and follows every page token.
    ///
    /// Returns all places from all pages in page order, without
    /// deduplication. The configured page-token delay is applied before each
    /// follow-up request.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::InvalidQuery`] if `query` is blank; nothing is sent.
    /// - [`PlacesError::PaginationLimit`] if the token never runs out.
    /// - Any error from [`Self::search_page`]; places from earlier pages are
    ///   discarded.
    pub async fn search_all(&self, query: &str) -> Result<Vec<Place>, PlacesError> {
        if query.trim().is_empty() {
            return Err(PlacesError::InvalidQuery);
        }

        let mut places = Vec::new();
        let mut token: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            if page > MAX_PAGES {
                return Err(PlacesError::PaginationLimit {
                    query: query.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            if token.is_some() && !self.page_token_delay.is_zero() {
                tokio::time::sleep(self.page_token_delay).await;
            }

            let response = self.search_page(query, token.as_deref()).await?;
            tracing::debug!(query, page, results = response.results.len(), "search page fetched");
            places.extend(response.results);

            token = response.next_page_token.filter(|t| !t.is_empty());
            if token.is_none() {
                break;
            }
        }

        Ok(places)
    }

    /// Fetches a single page of text-search results.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the service reports an error status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, PlacesError> {
        let mut params = vec![("query", query)];
        if let Some(t) = page_token {
            params.push(("pagetoken", t));
        }
        let url = self.build_url("textsearch/json", &params)?;
        let context = format!("textsearch(query={query})");

        self.get_with_retry(&url, &context, &["OK", "ZERO_RESULTS"])
            .await
    }

    /// Fetches the expanded record for one place.
    ///
    /// A response without a `result` object, or a `NOT_FOUND` /
    /// `ZERO_RESULTS` status, yields an empty [`PlaceDetail`].
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the service reports an error status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;
        let context = format!("details(place_id={place_id})");

        let response: DetailsResponse = self
            .get_with_retry(&url, &context, &["OK", "ZERO_RESULTS", "NOT_FOUND"])
            .await?;
        Ok(response.result.unwrap_or_default())
    }

    /// Builds an endpoint URL with the API key and percent-encoded params.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request with retry, checks the envelope `status`, and
    /// deserializes the body.
    ///
    /// The status check runs inside the retry loop so transient API statuses
    /// such as `OVER_QUERY_LIMIT` are retried like network failures.
    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
        accepted: &[&str],
    ) -> Result<T, PlacesError> {
        let body = retry_with_backoff(
            self.retry.max_retries,
            self.retry.backoff_base_ms,
            move || async move {
                let response = self.client.get(url.clone()).send().await?;
                let response = response.error_for_status()?;
                let text = response.text().await?;
                let body: serde_json::Value =
                    serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                        context: context.to_owned(),
                        source: e,
                    })?;
                check_status(&body, accepted)?;
                Ok(body)
            },
        )
        .await?;

        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Checks the top-level `"status"` field against the accepted values.
fn check_status(body: &serde_json::Value, accepted: &[&str]) -> Result<(), PlacesError> {
    let status = body
        .get("status")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("MISSING_STATUS");
    if accepted.contains(&status) {
        return Ok(());
    }
    let message = body
        .get("error_message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("no error message");
    Err(PlacesError::ApiStatus {
        status: status.to_owned(),
        message: message.to_owned(),
    })
}
