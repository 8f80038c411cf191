//! Low-level HTTP client: `CmcHttp`.
//!
//! One GET per call, no retries: the next scheduled refresh is the retry.
//! Returns wire types; flattening happens in the listing domain.

use crate::domain::listing::wire::{error_message_from_body, ListingsResponse};
use crate::domain::listing::ListingsSource;
use crate::error::{ConfigError, TerminalError, UpstreamError};
use crate::network::API_KEY_HEADER;
use crate::shared::SnapshotKey;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

/// Low-level HTTP client for the listings endpoint.
pub struct CmcHttp {
    listings_url: String,
    client: Client,
    /// API key. NEVER logged or exposed publicly.
    api_key: Option<String>,
}

impl CmcHttp {
    pub fn new(
        listings_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            listings_url: listings_url.trim_end_matches('/').to_string(),
            client,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `<listings_url>?start=1&limit=<N>&convert=<CUR>`
    pub fn listings_request_url(&self, key: &SnapshotKey) -> String {
        format!(
            "{}?start=1&limit={}&convert={}",
            self.listings_url,
            key.limit,
            urlencoding::encode(key.currency.as_str())
        )
    }

    // ── Listings ─────────────────────────────────────────────────────────

    pub async fn get_listings(&self, key: &SnapshotKey) -> Result<ListingsResponse, TerminalError> {
        // Checked before anything goes on the wire.
        let api_key = self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)?;
        let url = self.listings_request_url(key);

        tracing::debug!(limit = key.limit, currency = %key.currency, "GET {}", self.listings_url);

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify)?;
        let status = resp.status();

        if status.is_success() {
            let body: serde_json::Value = resp.json().await.map_err(classify)?;
            return Ok(ListingsResponse::from_value(body)?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        let message = error_message_from_body(&body_text).unwrap_or(body_text);

        Err(match status_code {
            401 | 403 => UpstreamError::Unauthorized(message),
            429 => UpstreamError::RateLimited,
            400..=499 => UpstreamError::BadRequest(message),
            _ => UpstreamError::Server {
                status: status_code,
                body: message,
            },
        }
        .into())
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Request(err)
    }
}

#[async_trait]
impl ListingsSource for CmcHttp {
    async fn fetch_listings(&self, key: &SnapshotKey) -> Result<ListingsResponse, TerminalError> {
        self.get_listings(key).await
    }
}

impl Clone for CmcHttp {
    fn clone(&self) -> Self {
        Self {
            listings_url: self.listings_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
        }
    }
}
