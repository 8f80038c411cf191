//! Market-wide header figures, computed over the whole snapshot (search does
//! not apply).

use super::format::{currency_magnitude, MagnitudeStyle, MISSING};
use crate::domain::listing::Snapshot;
use serde::{Deserialize, Serialize};

/// Symbols with a dedicated dominance figure.
pub const DOMINANCE_SYMBOLS: [&str; 2] = ["BTC", "ETH"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dominance {
    pub symbol: String,
    pub market_cap: Option<f64>,
    /// Share of the summed market cap, in percent.
    pub share_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Sum over the fetched rows only, so an estimate for small limits.
    pub total_market_cap: Option<f64>,
    pub total_volume_24h: Option<f64>,
    pub dominance: Vec<Dominance>,
}

/// A labelled header figure, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl MarketSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let currency = &snapshot.key.currency;
        let cap_key = currency.field("market_cap");
        let total_market_cap = snapshot.column_sum(&cap_key);

        let dominance = DOMINANCE_SYMBOLS
            .iter()
            .map(|symbol| {
                let market_cap = snapshot
                    .rows
                    .iter()
                    .find(|r| r.symbol == *symbol)
                    .and_then(|r| r.number(&cap_key));
                let share_pct = match (market_cap, total_market_cap) {
                    (Some(cap), Some(total)) if total != 0.0 => Some(cap / total * 100.0),
                    _ => None,
                };
                Dominance {
                    symbol: symbol.to_string(),
                    market_cap,
                    share_pct,
                }
            })
            .collect();

        Self {
            total_market_cap,
            total_volume_24h: snapshot.column_sum(&currency.field("volume_24h")),
            dominance,
        }
    }

    /// Header lines in display order: total cap, per-symbol caps, volume.
    pub fn metrics(&self, snapshot: &Snapshot) -> Vec<Metric> {
        let currency = &snapshot.key.currency;
        let amount = |v: Option<f64>| {
            v.map(|v| currency_magnitude(v, MagnitudeStyle::Humanized, currency))
                .unwrap_or_else(|| MISSING.to_string())
        };

        let mut metrics = vec![Metric {
            label: "Total Market Cap (est.)".to_string(),
            value: amount(self.total_market_cap),
            delta: None,
        }];
        metrics.extend(self.dominance.iter().map(|d| Metric {
            label: format!("{} Market Cap", d.symbol),
            value: amount(d.market_cap),
            delta: d.share_pct.map(|p| format!("{:.2}%", p)),
        }));
        metrics.push(Metric {
            label: "24h Volume (est.)".to_string(),
            value: amount(self.total_volume_24h),
            delta: None,
        });
        metrics
    }
}
