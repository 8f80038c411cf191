//! Text search over name and symbol.

use crate::domain::listing::AssetQuote;

/// Rows whose name or symbol contains `search`, ignoring case. Empty search
/// keeps every row. Order is preserved.
pub fn filter_rows<'a>(rows: &'a [AssetQuote], search: &str) -> Vec<&'a AssetQuote> {
    if search.is_empty() {
        return rows.iter().collect();
    }
    let needle = search.to_lowercase();
    rows.iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle) || r.symbol.to_lowercase().contains(&needle)
        })
        .collect()
}
