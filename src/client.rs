//! High-level client: `CmcClient` with sub-client accessors.
//!
//! The listing sub-client lives in `domain/listing/client.rs`. This module
//! keeps the builder, the shared cache state and the accessor.

use crate::domain::listing::cache::SnapshotCache;
use crate::domain::listing::client::Listings;
use crate::domain::listing::ListingsSource;
use crate::error::{ConfigError, TerminalError};
use crate::network::{API_KEY_ENV, DEFAULT_LISTINGS_URL};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::listing::client::Listings as ListingsClient;

/// Default time-to-live of a cached snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

/// Default bound on one upstream request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The primary entry point.
///
/// Cloning is cheap; clones share the snapshot cache, so the cache is
/// process-wide as long as one client is built at startup and cloned around.
#[derive(Clone)]
pub struct CmcClient {
    pub(crate) source: Arc<dyn ListingsSource>,
    /// Snapshot cache: (limit, currency) → (Snapshot, stored_at)
    pub(crate) snapshot_cache: Arc<SnapshotCache>,
}

impl CmcClient {
    pub fn builder() -> CmcClientBuilder {
        CmcClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn listings(&self) -> Listings<'_> {
        Listings { client: self }
    }

    pub fn cache_ttl(&self) -> Duration {
        self.snapshot_cache.ttl()
    }
}

impl std::fmt::Debug for CmcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmcClient")
            .field("cache_ttl", &self.snapshot_cache.ttl())
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CmcClientBuilder {
    api_key: Option<String>,
    listings_url: String,
    cache_ttl: Duration,
    request_timeout: Duration,
    source: Option<Arc<dyn ListingsSource>>,
}

impl Default for CmcClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            listings_url: DEFAULT_LISTINGS_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            source: None,
        }
    }
}

impl CmcClientBuilder {
    /// Builder seeded from the process environment:
    /// `CMC_API_KEY`, `CMC_LISTINGS_URL`, `CMC_CACHE_TTL_SECS`, `CMC_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::default();
        if let Some(key) = lookup(API_KEY_ENV) {
            builder = builder.api_key(&key);
        }
        if let Some(url) = lookup("CMC_LISTINGS_URL") {
            builder = builder.listings_url(&url);
        }
        if let Some(secs) = lookup("CMC_CACHE_TTL_SECS") {
            builder = builder.cache_ttl(parse_secs("CMC_CACHE_TTL_SECS", &secs)?);
        }
        if let Some(secs) = lookup("CMC_TIMEOUT_SECS") {
            builder = builder.request_timeout(parse_secs("CMC_TIMEOUT_SECS", &secs)?);
        }
        Ok(builder)
    }

    /// Blank keys count as missing.
    pub fn api_key(mut self, key: &str) -> Self {
        let key = key.trim();
        self.api_key = (!key.is_empty()).then(|| key.to_string());
        self
    }

    pub fn listings_url(mut self, url: &str) -> Self {
        self.listings_url = url.to_string();
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the HTTP fetcher (tests, proxies, recorded payloads).
    pub fn source(mut self, source: impl ListingsSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn build(self) -> Result<CmcClient, TerminalError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                name: "request_timeout",
                value: "0s".to_string(),
            }
            .into());
        }

        let source = match self.source {
            Some(source) => source,
            None => self.default_source()?,
        };

        Ok(CmcClient {
            source,
            snapshot_cache: Arc::new(SnapshotCache::new(self.cache_ttl)),
        })
    }

    #[cfg(feature = "http")]
    fn default_source(&self) -> Result<Arc<dyn ListingsSource>, TerminalError> {
        let http = crate::http::CmcHttp::new(
            &self.listings_url,
            self.api_key.clone(),
            self.request_timeout,
        )?;
        Ok(Arc::new(http))
    }

    #[cfg(not(feature = "http"))]
    fn default_source(&self) -> Result<Arc<dyn ListingsSource>, TerminalError> {
        Err(ConfigError::InvalidSetting {
            name: "source",
            value: "none (enable the `http` feature or set a source)".to_string(),
        }
        .into())
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidSetting {
            name,
            value: value.to_string(),
        })
}
