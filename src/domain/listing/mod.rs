//! Listing domain: flattened asset rows, column schema, snapshots.

pub mod cache;
pub mod client;
mod convert;
pub mod source;
pub mod wire;

use crate::shared::SnapshotKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use convert::flatten_record;
pub use source::ListingsSource;

// ─── FormatKind ──────────────────────────────────────────────────────────────

/// How a column's values are rendered. Attached when the snapshot is built;
/// the formatter reads this tag and never inspects column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    /// Currency amount with exactly two decimals.
    Currency2dp,
    /// Large currency amount (market cap, volume); grouped or humanized.
    CurrencyInt,
    /// Signed percentage with two decimals.
    PercentSigned,
    PlainNumber,
    Text,
}

impl FormatKind {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, FormatKind::Text)
    }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Part of the fixed display set, shown by default.
    Preferred,
    /// Discovered in the payload; hidden unless toggled on.
    Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub kind: FormatKind,
    pub role: ColumnRole,
}

/// Columns available in a snapshot: preferred ones first (fixed order), then
/// extras in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn get(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn preferred(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| c.role == ColumnRole::Preferred)
    }

    pub fn extras(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.role == ColumnRole::Extra)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ─── AssetQuote ──────────────────────────────────────────────────────────────

/// One flattened asset row. `fields` holds every flattened key, including the
/// ones mirrored into the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    /// Upstream market-cap rank (`cmc_rank`). Never recomputed locally.
    pub rank: Option<u32>,
    pub name: String,
    pub symbol: String,
    pub fields: Map<String, Value>,
}

impl AssetQuote {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let rank = fields
            .get("cmc_rank")
            .and_then(Value::as_u64)
            .and_then(|r| u32::try_from(r).ok());
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            rank,
            name: text("name"),
            symbol: text("symbol"),
            fields,
        }
    }

    /// Field value, treating JSON `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One fetched, flattened listing. Immutable once built; a newer fetch
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub key: SnapshotKey,
    pub fetched_at: DateTime<Utc>,
    pub rows: Vec<AssetQuote>,
    pub schema: Schema,
    pub status: Option<wire::ApiStatus>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row with the given symbol (symbols are not guaranteed unique).
    pub fn find_symbol(&self, symbol: &str) -> Option<&AssetQuote> {
        self.rows
            .iter()
            .find(|r| r.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Sum of a numeric column over all rows, `None` if no row has it.
    pub fn column_sum(&self, key: &str) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.number(key))
            .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
    }
}
