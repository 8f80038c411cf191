//! Single-asset detail panel.

use super::format::{currency_fixed, currency_magnitude, percent_cell, Cell, MagnitudeStyle, MISSING};
use crate::domain::listing::AssetQuote;
use crate::shared::Currency;
use serde::{Deserialize, Serialize};

/// Most symbols offered for selection.
pub const MAX_SYMBOL_OPTIONS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub name: String,
    pub symbol: String,
    /// Four decimals, for low-priced assets.
    pub price: String,
    pub change_24h: Cell,
    pub market_cap: String,
    /// The whole flattened row.
    pub raw_json: String,
}

impl AssetDetail {
    /// Detail for the first of `rows` with `symbol` (exact match, as offered
    /// by [`symbol_options`]). `None` when the symbol is not among the rows.
    pub fn find(rows: &[&AssetQuote], symbol: &str, currency: &Currency) -> Option<Self> {
        rows.iter()
            .find(|r| r.symbol == symbol)
            .map(|row| Self::from_row(row, currency))
    }

    pub fn from_row(row: &AssetQuote, currency: &Currency) -> Self {
        let price = row
            .number(&currency.field("price"))
            .map(|p| currency_fixed(p, 4, currency))
            .unwrap_or_else(|| MISSING.to_string());

        let change_24h = row
            .number(&currency.field("percent_change_24h"))
            .map(percent_cell)
            .unwrap_or_else(Cell::missing);

        let market_cap = row
            .number(&currency.field("market_cap"))
            .map(|m| currency_magnitude(m, MagnitudeStyle::Humanized, currency))
            .unwrap_or_else(|| MISSING.to_string());

        // A map of JSON values always serializes.
        let raw_json = serde_json::to_string_pretty(&row.fields).unwrap_or_default();

        Self {
            name: row.name.clone(),
            symbol: row.symbol.clone(),
            price,
            change_24h,
            market_cap,
            raw_json,
        }
    }
}

/// Selectable symbols, in row order, capped at [`MAX_SYMBOL_OPTIONS`].
pub fn symbol_options(rows: &[&AssetQuote]) -> Vec<String> {
    rows.iter()
        .take(MAX_SYMBOL_OPTIONS)
        .map(|r| r.symbol.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Tone;
    use serde_json::{json, Value};

    fn quote(value: Value) -> AssetQuote {
        match value {
            Value::Object(map) => AssetQuote::from_fields(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_detail_fields() {
        let row = quote(json!({
            "name": "Ripple", "symbol": "XRP",
            "USD_price": 0.52341, "USD_percent_change_24h": -1.5,
            "USD_market_cap": 28_500_000_000.0
        }));
        let detail = AssetDetail::find(&[&row], "XRP", &Currency::usd()).unwrap();
        assert_eq!(detail.price, "$0.5234");
        assert_eq!(detail.change_24h.text, "-1.50%");
        assert_eq!(detail.change_24h.tone, Tone::Negative);
        assert_eq!(detail.market_cap, "$28.50B");
        assert!(detail.raw_json.contains("\"USD_price\": 0.52341"));
    }

    #[test]
    fn test_missing_values_and_unknown_symbol() {
        let row = quote(json!({ "name": "Nothing", "symbol": "NIL" }));
        let detail = AssetDetail::from_row(&row, &Currency::usd());
        assert_eq!(detail.price, MISSING);
        assert_eq!(detail.change_24h, Cell::missing());
        assert!(AssetDetail::find(&[&row], "BTC", &Currency::usd()).is_none());
    }

    #[test]
    fn test_symbol_options_capped() {
        let rows: Vec<AssetQuote> = (0..250)
            .map(|i| quote(json!({ "symbol": format!("S{i}") })))
            .collect();
        let refs: Vec<&AssetQuote> = rows.iter().collect();
        let options = symbol_options(&refs);
        assert_eq!(options.len(), MAX_SYMBOL_OPTIONS);
        assert_eq!(options[0], "S0");
    }
}
