//! Listings sub-client: cached snapshots, raw fetches, cache control.

use crate::client::CmcClient;
use crate::domain::listing::wire::ListingsResponse;
use crate::domain::listing::{ListingsSource, Snapshot};
use crate::error::TerminalError;
use crate::shared::SnapshotKey;
use chrono::Utc;
use std::sync::Arc;

/// Sub-client for listing snapshots.
pub struct Listings<'a> {
    pub(crate) client: &'a CmcClient,
}

impl<'a> Listings<'a> {
    /// Get the flattened snapshot for the top `limit` assets in `currency`.
    /// Uses the TTL cache; concurrent callers share one upstream request.
    pub async fn get_snapshot(
        &self,
        limit: u32,
        currency: &str,
    ) -> Result<Arc<Snapshot>, TerminalError> {
        let key = SnapshotKey::new(limit, currency)?;
        self.get(&key).await
    }

    pub async fn get(&self, key: &SnapshotKey) -> Result<Arc<Snapshot>, TerminalError> {
        let source = self.client.source.as_ref();
        self.client
            .snapshot_cache
            .get_or_fetch(key, || fetch_snapshot(source, key))
            .await
    }

    /// Fetch the raw, unflattened payload. Bypasses the cache.
    pub async fn fetch_raw(
        &self,
        limit: u32,
        currency: &str,
    ) -> Result<ListingsResponse, TerminalError> {
        let key = SnapshotKey::new(limit, currency)?;
        self.client.source.fetch_listings(&key).await
    }

    /// Last good snapshot for `key`, even if older than the TTL.
    pub async fn cached(&self, key: &SnapshotKey) -> Option<Arc<Snapshot>> {
        self.client.snapshot_cache.peek(key).await
    }

    /// Invalidate the cached snapshot for `key`.
    pub async fn invalidate(&self, key: &SnapshotKey) {
        self.client.snapshot_cache.invalidate(key).await;
    }

    /// Clear all cached snapshots.
    pub async fn clear_cache(&self) {
        self.client.snapshot_cache.clear().await;
    }
}

async fn fetch_snapshot(
    source: &dyn ListingsSource,
    key: &SnapshotKey,
) -> Result<Snapshot, TerminalError> {
    let started = std::time::Instant::now();
    let response = source.fetch_listings(key).await.map_err(|e| {
        tracing::warn!(%key, error = %e, "Listings fetch failed");
        e
    })?;
    tracing::info!(
        %key,
        records = response.data.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetched listings"
    );
    Ok(Snapshot::from_response(key.clone(), response, Utc::now()))
}
