//! Column selection and display labels.

use crate::domain::listing::{ColumnSpec, FormatKind, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An output column: data key, display label, formatting tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColumn {
    pub key: String,
    pub label: String,
    pub kind: FormatKind,
}

/// Preferred columns present in the snapshot, then the enabled extras in
/// schema order. Enabled keys the schema does not know are ignored.
pub fn select_columns<'a>(schema: &'a Schema, extras: &BTreeSet<String>) -> Vec<&'a ColumnSpec> {
    schema
        .preferred()
        .chain(schema.extras().filter(|c| extras.contains(&c.key)))
        .collect()
}

/// Attaches display labels. Keys are carried through unchanged so later
/// stages still address the data by key.
pub fn rename(columns: &[&ColumnSpec]) -> Vec<DisplayColumn> {
    columns
        .iter()
        .map(|c| DisplayColumn {
            key: c.key.clone(),
            label: c.label.clone(),
            kind: c.kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::ColumnRole;

    fn spec(key: &str, role: ColumnRole) -> ColumnSpec {
        ColumnSpec {
            key: key.to_string(),
            label: key.to_uppercase(),
            kind: FormatKind::Text,
            role,
        }
    }

    fn schema() -> Schema {
        Schema::new(vec![
            spec("name", ColumnRole::Preferred),
            spec("symbol", ColumnRole::Preferred),
            spec("slug", ColumnRole::Extra),
            spec("tags", ColumnRole::Extra),
        ])
    }

    #[test]
    fn test_extras_hidden_by_default() {
        let schema = schema();
        let keys: Vec<&str> = select_columns(&schema, &BTreeSet::new())
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(keys, ["name", "symbol"]);
    }

    #[test]
    fn test_enabled_extras_follow_schema_order() {
        let schema = schema();
        let enabled: BTreeSet<String> = ["tags", "slug", "unknown"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let keys: Vec<&str> = select_columns(&schema, &enabled)
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(keys, ["name", "symbol", "slug", "tags"]);
    }

    #[test]
    fn test_rename_keeps_keys() {
        let schema = schema();
        let renamed = rename(&select_columns(&schema, &BTreeSet::new()));
        assert_eq!(renamed[0].key, "name");
        assert_eq!(renamed[0].label, "NAME");
    }
}
