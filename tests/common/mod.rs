//! Shared fixtures: a scripted in-memory `ListingsSource` and sample payloads.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use cmc_terminal::domain::listing::wire::ListingsResponse;
use cmc_terminal::domain::listing::ListingsSource;
use cmc_terminal::error::{ConfigError, TerminalError, UpstreamError};
use cmc_terminal::shared::SnapshotKey;

/// What the next fetch does.
#[derive(Debug, Clone)]
pub enum Step {
    Ok(Value),
    Timeout,
    MissingKey,
}

/// Fake upstream. Pops scripted steps, then repeats `fallback` forever.
#[derive(Clone)]
pub struct FakeSource {
    calls: Arc<AtomicUsize>,
    delay: Duration,
    script: Arc<Mutex<VecDeque<Step>>>,
    fallback: Value,
}

impl FakeSource {
    pub fn new(payload: Value) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: payload,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn then(self, step: Step) -> Self {
        self.script.lock().unwrap().push_back(step);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared counter, readable after the source moves into a client.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ListingsSource for FakeSource {
    async fn fetch_listings(&self, _key: &SnapshotKey) -> Result<ListingsResponse, TerminalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Step::Ok(self.fallback.clone()));
        match step {
            Step::Ok(body) => Ok(ListingsResponse::from_value(body)?),
            Step::Timeout => Err(UpstreamError::Timeout.into()),
            Step::MissingKey => Err(ConfigError::MissingApiKey.into()),
        }
    }
}

fn asset(rank: u32, name: &str, symbol: &str, price: f64, change_24h: f64, cap: f64) -> Value {
    json!({
        "id": rank,
        "cmc_rank": rank,
        "name": name,
        "symbol": symbol,
        "slug": name.to_lowercase(),
        "tags": ["mineable"],
        "platform": null,
        "quote": {
            "USD": {
                "price": price,
                "volume_24h": cap / 20.0,
                "percent_change_1h": 0.1,
                "percent_change_24h": change_24h,
                "percent_change_7d": -2.0,
                "market_cap": cap,
                "last_updated": "2024-05-01T12:00:00.000Z"
            }
        }
    })
}

/// BTC, ETH, XRP in rank order.
pub fn three_assets() -> Value {
    json!({
        "status": {
            "timestamp": "2024-05-01T12:00:00.000Z",
            "error_code": 0,
            "error_message": null,
            "elapsed": 12,
            "credit_count": 1
        },
        "data": [
            asset(1, "Bitcoin", "BTC", 50000.0, 1.5, 1_000_000_000_000.0),
            asset(2, "Ethereum", "ETH", 3000.0, -0.5, 360_000_000_000.0),
            asset(3, "XRP", "XRP", 0.52, 0.0, 28_000_000_000.0),
        ]
    })
}

pub fn empty_payload() -> Value {
    json!({ "status": { "error_code": 0 }, "data": [] })
}
