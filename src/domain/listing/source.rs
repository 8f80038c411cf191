//! Where raw listings come from.

use super::wire::ListingsResponse;
use crate::error::TerminalError;
use crate::shared::SnapshotKey;
use async_trait::async_trait;

/// A fetcher for the raw listings payload.
///
/// Implementations issue at most one upstream request per call and must not
/// touch shared state; caching happens above this layer. The HTTP
/// implementation is [`crate::http::CmcHttp`].
#[async_trait]
pub trait ListingsSource: Send + Sync {
    async fn fetch_listings(&self, key: &SnapshotKey) -> Result<ListingsResponse, TerminalError>;
}
