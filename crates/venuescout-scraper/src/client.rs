//! HTTP client for fetching venue pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::phone::extract_phone;

/// Outcome of looking up a venue's phone number on its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneLookup {
    /// The response body contained a phone number.
    Found(String),
    /// A response was received but no phone number matched.
    NotFound,
    /// No response was received; the cause has already been logged.
    Unavailable,
}

/// Fetches venue pages with a fixed timeout and `User-Agent`.
///
/// Pages are fetched once; there is no retry. Callers treat a failed fetch
/// as missing enrichment, not as a failed run.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` does not parse.
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches `url` and extracts the first phone number on the page.
    ///
    /// The body is searched whatever the response status, since blocked or
    /// login-walled pages often still show the number. Only an unparseable
    /// URL or a transport failure yields [`PhoneLookup::Unavailable`]; the
    /// cause is logged at `warn`.
    pub async fn scrape_phone(&self, url: &str) -> PhoneLookup {
        let body = match self.get(url).await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::debug!(url, status = status.as_u16(), "non-success page status");
                }
                response.text().await.map_err(ScraperError::from)
            }
            Err(e) => Err(e),
        };

        match body {
            Ok(html) => match extract_phone(&html) {
                Some(phone) => PhoneLookup::Found(phone),
                None => {
                    tracing::debug!(url, "no phone number on page");
                    PhoneLookup::NotFound
                }
            },
            Err(e) => {
                tracing::warn!(url, error = %e, "venue page fetch failed");
                PhoneLookup::Unavailable
            }
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        Ok(response)
    }
}
