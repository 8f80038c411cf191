//! Stable sort by one column.

use super::state::{SortDirection, SortSpec};
use crate::domain::listing::{AssetQuote, Schema};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(SortKey::Number),
            Value::String(s) => Some(SortKey::Text(s.to_lowercase())),
            other => Some(SortKey::Text(other.to_string().to_lowercase())),
        }
    }

    /// Numbers sort before text.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Sorts `rows` in place. Ties keep their prior order in both directions and
/// rows without a value go last. A key the schema does not know leaves the
/// order untouched.
pub fn sort_rows(rows: &mut Vec<&AssetQuote>, schema: &Schema, sort: Option<&SortSpec>) {
    let Some(sort) = sort else {
        return;
    };
    if !schema.contains(&sort.key) {
        tracing::debug!(key = %sort.key, "Sort key not in snapshot, keeping order");
        return;
    }

    let mut keyed: Vec<(Option<SortKey>, &AssetQuote)> = rows
        .drain(..)
        .map(|row| (SortKey::of(row.get(&sort.key)), row))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match sort.direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => b.compare(a),
        },
    });

    rows.extend(keyed.into_iter().map(|(_, row)| row));
}
