//! Conversion: ListingsResponse → Snapshot (flattening + schema discovery).

use super::wire::{AssetRecord, ListingsResponse};
use super::{AssetQuote, ColumnRole, ColumnSpec, FormatKind, Schema, Snapshot};
use crate::shared::{Currency, SnapshotKey};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

const QUOTE_KEY: &str = "quote";

/// Quote fields shown by default, in display order.
const PREFERRED_QUOTE_FIELDS: [(&str, &str); 9] = [
    ("price", "Price"),
    ("percent_change_1h", "1h %"),
    ("percent_change_24h", "24h %"),
    ("percent_change_7d", "7d %"),
    ("percent_change_30d", "30d %"),
    ("percent_change_60d", "60d %"),
    ("percent_change_90d", "90d %"),
    ("market_cap", "Market Cap"),
    ("volume_24h", "24h Volume"),
];

/// Flattens one raw record for `currency`.
///
/// Top-level scalars and arrays are copied as-is, nested objects get dotted
/// keys (`platform.symbol`), and `quote.<CUR>` is hoisted with a `<CUR>_`
/// prefix. Quotes for any other currency are dropped.
pub fn flatten_record(record: &AssetRecord, currency: &Currency) -> Map<String, Value> {
    let mut row = Map::new();

    for (key, value) in record {
        if key == QUOTE_KEY {
            continue;
        }
        match value {
            Value::Object(inner) => flatten_nested(key, inner, &mut row),
            other => {
                row.insert(key.clone(), other.clone());
            }
        }
    }

    if let Some(Value::Object(quote)) = record
        .get(QUOTE_KEY)
        .and_then(|q| q.get(currency.as_str()))
    {
        for (key, value) in quote {
            row.insert(currency.field(key), value.clone());
        }
    }

    row
}

fn flatten_nested(prefix: &str, object: &Map<String, Value>, row: &mut Map<String, Value>) {
    for (key, value) in object {
        let path = format!("{}.{}", prefix, key);
        match value {
            Value::Object(inner) => flatten_nested(&path, inner, row),
            other => {
                row.insert(path, other.clone());
            }
        }
    }
}

impl Snapshot {
    /// Builds a snapshot from a raw payload. Row order is preserved.
    pub fn from_response(
        key: SnapshotKey,
        response: ListingsResponse,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let mut discovered: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let rows: Vec<AssetQuote> = response
            .data
            .iter()
            .map(|record| {
                let fields = flatten_record(record, &key.currency);
                for field in fields.keys() {
                    if seen.insert(field.clone()) {
                        discovered.push(field.clone());
                    }
                }
                AssetQuote::from_fields(fields)
            })
            .collect();

        let schema = build_schema(&key.currency, &discovered, &rows);

        Snapshot {
            key,
            fetched_at,
            rows,
            schema,
            status: response.status,
        }
    }
}

/// Preferred columns present in the payload, in fixed order, followed by every
/// other discovered key as an opt-in extra.
fn build_schema(currency: &Currency, discovered: &[String], rows: &[AssetQuote]) -> Schema {
    let present: HashSet<&str> = discovered.iter().map(String::as_str).collect();
    let mut columns = Vec::new();

    for (key, label, kind) in preferred_columns(currency) {
        if present.contains(key.as_str()) {
            columns.push(ColumnSpec {
                key,
                label,
                kind,
                role: ColumnRole::Preferred,
            });
        }
    }

    for key in discovered {
        if columns.iter().any(|c| &c.key == key) {
            continue;
        }
        columns.push(ColumnSpec {
            key: key.clone(),
            label: key.clone(),
            kind: kind_for(currency, key, rows),
            role: ColumnRole::Extra,
        });
    }

    Schema::new(columns)
}

fn preferred_columns(currency: &Currency) -> Vec<(String, String, FormatKind)> {
    let mut columns = vec![
        ("cmc_rank".to_string(), "Rank".to_string(), FormatKind::PlainNumber),
        ("name".to_string(), "Name".to_string(), FormatKind::Text),
        ("symbol".to_string(), "Symbol".to_string(), FormatKind::Text),
    ];
    for (quote_key, label) in PREFERRED_QUOTE_FIELDS {
        let kind = quote_kind(quote_key).unwrap_or(FormatKind::PlainNumber);
        let label = match kind {
            FormatKind::PercentSigned => label.to_string(),
            _ => format!("{} ({})", label, currency),
        };
        columns.push((currency.field(quote_key), label, kind));
    }
    columns
}

/// Known quote fields. Anything else falls back to the value's JSON type.
fn quote_kind(quote_key: &str) -> Option<FormatKind> {
    match quote_key {
        "price" => Some(FormatKind::Currency2dp),
        "market_cap" | "volume_24h" | "fully_diluted_market_cap" | "tvl" => {
            Some(FormatKind::CurrencyInt)
        }
        "volume_change_24h" => Some(FormatKind::PercentSigned),
        "market_cap_dominance" => Some(FormatKind::PlainNumber),
        "last_updated" => Some(FormatKind::Text),
        k if k.starts_with("percent_change_") => Some(FormatKind::PercentSigned),
        _ => None,
    }
}

fn kind_for(currency: &Currency, key: &str, rows: &[AssetQuote]) -> FormatKind {
    if let Some(kind) = key
        .strip_prefix(&currency.field_prefix())
        .and_then(quote_kind)
    {
        return kind;
    }

    let sample = rows.iter().find_map(|r| r.get(key));
    match sample {
        Some(Value::Number(_)) => FormatKind::PlainNumber,
        _ => FormatKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AssetRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn usd() -> Currency {
        Currency::usd()
    }

    #[test]
    fn test_flatten_hoists_requested_quote() {
        let flat = flatten_record(
            &record(json!({ "symbol": "BTC", "quote": { "USD": { "price": 50000 } } })),
            &usd(),
        );
        assert_eq!(Value::Object(flat), json!({ "symbol": "BTC", "USD_price": 50000 }));
    }

    #[test]
    fn test_flatten_discards_other_currencies() {
        let flat = flatten_record(
            &record(json!({
                "symbol": "BTC",
                "quote": {
                    "USD": { "price": 50000.0 },
                    "EUR": { "price": 46000.0 }
                }
            })),
            &Currency::new("EUR").unwrap(),
        );
        assert_eq!(flat.get("EUR_price"), Some(&json!(46000.0)));
        assert!(!flat.contains_key("USD_price"));
        assert!(!flat.contains_key("quote"));
    }

    #[test]
    fn test_flatten_nested_objects_and_arrays() {
        let flat = flatten_record(
            &record(json!({
                "symbol": "USDT",
                "tags": ["stablecoin", "payments"],
                "platform": { "name": "Ethereum", "token_address": "0xdac1" },
                "max_supply": null
            })),
            &usd(),
        );
        assert_eq!(flat.get("platform.name"), Some(&json!("Ethereum")));
        assert_eq!(flat.get("tags"), Some(&json!(["stablecoin", "payments"])));
        assert_eq!(flat.get("max_supply"), Some(&Value::Null));
    }

    #[test]
    fn test_flatten_missing_quote_keeps_scalars() {
        let flat = flatten_record(&record(json!({ "symbol": "BTC", "quote": {} })), &usd());
        assert_eq!(Value::Object(flat), json!({ "symbol": "BTC" }));
    }

    fn sample_response() -> ListingsResponse {
        ListingsResponse::from_value(json!({
            "data": [
                {
                    "id": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin", "cmc_rank": 1,
                    "quote": { "USD": {
                        "price": 50000.0, "percent_change_24h": 1.5, "market_cap": 9.8e11,
                        "volume_24h": 3.1e10, "market_cap_dominance": 52.1
                    } }
                },
                {
                    "id": 1027, "name": "Ethereum", "symbol": "ETH", "slug": "ethereum", "cmc_rank": 2,
                    "quote": { "USD": { "price": 3000.0, "percent_change_24h": -2.0 } }
                }
            ],
            "status": { "error_code": 0 }
        }))
        .unwrap()
    }

    #[test]
    fn test_snapshot_schema_preferred_then_extras() {
        let key = SnapshotKey::new(2, "USD").unwrap();
        let snap = Snapshot::from_response(key, sample_response(), Utc::now());

        assert_eq!(snap.len(), 2);
        assert_eq!(snap.rows[0].rank, Some(1));
        assert_eq!(snap.rows[1].symbol, "ETH");

        let preferred: Vec<&str> = snap.schema.preferred().map(|c| c.key.as_str()).collect();
        assert_eq!(
            preferred,
            [
                "cmc_rank",
                "name",
                "symbol",
                "USD_price",
                "USD_percent_change_24h",
                "USD_market_cap",
                "USD_volume_24h"
            ]
        );

        let extras: Vec<&str> = snap.schema.extras().map(|c| c.key.as_str()).collect();
        assert!(extras.contains(&"id"));
        assert!(extras.contains(&"slug"));
        assert!(extras.contains(&"USD_market_cap_dominance"));
        assert!(!extras.contains(&"symbol"));
    }

    #[test]
    fn test_snapshot_schema_kinds_and_labels() {
        let key = SnapshotKey::new(2, "USD").unwrap();
        let snap = Snapshot::from_response(key, sample_response(), Utc::now());
        let col = |k: &str| snap.schema.get(k).unwrap().clone();

        assert_eq!(col("USD_price").kind, FormatKind::Currency2dp);
        assert_eq!(col("USD_price").label, "Price (USD)");
        assert_eq!(col("USD_percent_change_24h").kind, FormatKind::PercentSigned);
        assert_eq!(col("USD_percent_change_24h").label, "24h %");
        assert_eq!(col("USD_market_cap").kind, FormatKind::CurrencyInt);
        assert_eq!(col("USD_market_cap_dominance").kind, FormatKind::PlainNumber);
        assert_eq!(col("id").kind, FormatKind::PlainNumber);
        assert_eq!(col("slug").kind, FormatKind::Text);
        assert_eq!(col("cmc_rank").kind, FormatKind::PlainNumber);
    }

    #[test]
    fn test_snapshot_from_empty_payload() {
        let key = SnapshotKey::new(10, "USD").unwrap();
        let snap = Snapshot::from_response(key, ListingsResponse::default(), Utc::now());
        assert!(snap.is_empty());
        assert!(snap.schema.is_empty());
    }
}
