//! Booking-site HTTP client.
//!
//! Fetches the home page (for the airport list) and the flight selection
//! page for a validated search. Each page is parsed once, checked for the
//! overload notice, and handed back as a document.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use scraper::Html;
use tracing::debug;

use crate::domain::IataCode;
use crate::validate::SearchRequest;

use super::error::AirblueError;
use super::page::{FLIGHT_SELECTION_PATH, is_overloaded, parse_airport_codes, search_query};

/// Default base URL of the booking site.
pub const DEFAULT_BASE_URL: &str = "https://www.airblue.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("flight-search/", env!("CARGO_PKG_VERSION"));

/// Configuration for the booking-site client.
#[derive(Debug, Clone)]
pub struct AirblueConfig {
    /// Base URL of the site (no trailing slash)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl AirblueConfig {
    /// Set a custom base URL (for testing or a mirror).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for AirblueConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Booking-site client.
#[derive(Debug, Clone)]
pub struct AirblueClient {
    http: reqwest::Client,
    base_url: String,
}

impl AirblueClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AirblueConfig) -> Result<Self, AirblueError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| AirblueError::Config("invalid User-Agent header".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Airport codes served by the site.
    pub async fn fetch_airport_codes(&self) -> Result<Vec<IataCode>, AirblueError> {
        let url = format!("{}/", self.base_url);
        let document = self.get_document(&url, &[]).await?;
        let codes = parse_airport_codes(&document);
        debug!(count = codes.len(), "loaded airport list");
        Ok(codes)
    }

    /// Parsed flight selection page for a search.
    ///
    /// Round-trip searches return both directions on the same page.
    pub async fn fetch_results_page(&self, request: &SearchRequest) -> Result<Html, AirblueError> {
        let url = format!("{}{}", self.base_url, FLIGHT_SELECTION_PATH);
        self.get_document(&url, &search_query(request)).await
    }

    async fn get_document(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Html, AirblueError> {
        debug!(%url, ?query, "GET");
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AirblueError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AirblueError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        let document = Html::parse_document(&body);

        // The site answers overload with a 200 and a notice page
        if is_overloaded(&document) {
            return Err(AirblueError::RateLimited);
        }

        Ok(document)
    }
}
