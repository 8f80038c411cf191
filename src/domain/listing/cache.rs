//! Process-wide snapshot cache with single-flight refresh.
//!
//! One slot per [`SnapshotKey`]. A slot holds the last good snapshot and a
//! fetch lock: only the holder of the lock talks to upstream, everyone else
//! waits and then reuses whatever the holder produced. A fetch that fails or
//! is dropped mid-flight commits nothing, so the previous snapshot stays
//! available through [`SnapshotCache::peek`].

use super::Snapshot;
use crate::error::{TerminalError, UpstreamError};
use crate::shared::SnapshotKey;

use async_lock::{Mutex, RwLock};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedSnapshot {
    snapshot: Arc<Snapshot>,
    stored_at: Instant,
}

/// Failure of a completed fetch, kept so callers that waited on it can share
/// the outcome instead of fetching again.
#[derive(Debug)]
struct Failure {
    attempt: u64,
    message: String,
}

#[derive(Debug, Default)]
struct Slot {
    entry: RwLock<Option<CachedSnapshot>>,
    fetch_lock: Mutex<Option<Failure>>,
    /// Number of fetches that ran to completion with a snapshot or an
    /// upstream failure. Config errors are not counted.
    completed: AtomicU64,
}

impl Slot {
    async fn latest(&self) -> Option<Arc<Snapshot>> {
        self.entry.read().await.as_ref().map(|c| c.snapshot.clone())
    }

    async fn fresh(&self, ttl: Duration) -> Option<Arc<Snapshot>> {
        self.entry
            .read()
            .await
            .as_ref()
            .filter(|c| c.stored_at.elapsed() < ttl)
            .map(|c| c.snapshot.clone())
    }
}

/// TTL cache of snapshots keyed by `(limit, currency)`.
#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    slots: RwLock<HashMap<SnapshotKey, Arc<Slot>>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn slot(&self, key: &SnapshotKey) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().await.get(key) {
            return slot.clone();
        }
        self.slots
            .write()
            .await
            .entry(key.clone())
            .or_default()
            .clone()
    }

    /// Returns the cached snapshot while it is younger than the TTL, otherwise
    /// runs `fetch` (at most one at a time per key) and stores its result.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &SnapshotKey,
        fetch: F,
    ) -> Result<Arc<Snapshot>, TerminalError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Snapshot, TerminalError>>,
    {
        let slot = self.slot(key).await;
        if let Some(snapshot) = slot.fresh(self.ttl).await {
            tracing::trace!(%key, "Snapshot cache hit");
            return Ok(snapshot);
        }

        let seen = slot.completed.load(Ordering::Acquire);
        let mut last_failure = slot.fetch_lock.lock().await;

        // Someone else may have finished a fetch while we waited for the lock.
        if let Some(snapshot) = slot.fresh(self.ttl).await {
            tracing::debug!(%key, "Reused snapshot from concurrent fetch");
            return Ok(snapshot);
        }
        let completed = slot.completed.load(Ordering::Acquire);
        if completed != seen {
            match &*last_failure {
                Some(failure) if failure.attempt == completed => {
                    tracing::debug!(%key, "Concurrent fetch failed, sharing its error");
                    return Err(UpstreamError::Coalesced(failure.message.clone()).into());
                }
                // The fetch we waited on succeeded; its snapshot is ours at any age.
                _ => {
                    if let Some(snapshot) = slot.latest().await {
                        tracing::debug!(%key, "Reused snapshot from concurrent fetch");
                        return Ok(snapshot);
                    }
                }
            }
        }

        tracing::debug!(%key, "Snapshot cache miss, fetching");
        match fetch().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *slot.entry.write().await = Some(CachedSnapshot {
                    snapshot: snapshot.clone(),
                    stored_at: Instant::now(),
                });
                *last_failure = None;
                slot.completed.fetch_add(1, Ordering::AcqRel);
                Ok(snapshot)
            }
            // Config errors fail fast without touching the network; waiters
            // run their own attempt.
            Err(err) if !err.is_recoverable() => Err(err),
            Err(err) => {
                let attempt = slot.completed.fetch_add(1, Ordering::AcqRel) + 1;
                let message = match &err {
                    TerminalError::Upstream(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                *last_failure = Some(Failure { attempt, message });
                Err(err)
            }
        }
    }

    /// Last good snapshot for `key`, regardless of age.
    pub async fn peek(&self, key: &SnapshotKey) -> Option<Arc<Snapshot>> {
        let slot = self.slots.read().await.get(key).cloned()?;
        slot.latest().await
    }

    /// Drops the snapshot for `key`; the next read fetches.
    pub async fn invalidate(&self, key: &SnapshotKey) {
        let slot = self.slots.read().await.get(key).cloned();
        if let Some(slot) = slot {
            *slot.entry.write().await = None;
        }
    }

    pub async fn clear(&self) {
        let slots: Vec<Arc<Slot>> = self.slots.read().await.values().cloned().collect();
        for slot in slots {
            *slot.entry.write().await = None;
        }
    }
}
