//! Cell formatting, driven by each column's `FormatKind`.

use crate::domain::listing::FormatKind;
use crate::shared::fmt::num;
use crate::shared::Currency;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder for missing or null values.
pub const MISSING: &str = "-";

/// How `CurrencyInt` columns are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MagnitudeStyle {
    /// `$1,234,567,890`
    #[default]
    Grouped,
    /// `$1.23B`
    Humanized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatOptions {
    pub magnitude: MagnitudeStyle,
}

/// Display hint for a cell. An annotation only; the data is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Tone {
    /// Tone of an already formatted signed figure (`+1.23%`, `-0.50%`, `0.00%`).
    pub fn of_signed(text: &str) -> Self {
        match text.chars().next() {
            Some('+') => Tone::Positive,
            Some('-') => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn missing() -> Self {
        Self::neutral(MISSING)
    }
}

/// Currency amount with a fixed number of decimals (`$1,234.57`).
pub fn currency_fixed(value: f64, decimals: usize, currency: &Currency) -> String {
    num::with_currency(num::fixed(value, decimals), currency.symbol(), currency.as_str())
}

/// Large currency amount, grouped or humanized.
pub fn currency_magnitude(value: f64, style: MagnitudeStyle, currency: &Currency) -> String {
    let body = match style {
        MagnitudeStyle::Grouped => num::fixed(value, 0),
        MagnitudeStyle::Humanized => num::humanize(value),
    };
    num::with_currency(body, currency.symbol(), currency.as_str())
}

/// Signed two-decimal percentage. The tone follows the printed sign, so a
/// change that rounds to `0.00%` is neutral.
pub fn percent_cell(value: f64) -> Cell {
    let text = num::percent_signed(value);
    Cell {
        tone: Tone::of_signed(&text),
        text,
    }
}

/// Formats one value. Only `PercentSigned` cells carry a non-neutral tone.
pub fn format_cell(
    value: Option<&Value>,
    kind: FormatKind,
    currency: &Currency,
    options: &FormatOptions,
) -> Cell {
    let value = match value {
        None | Some(Value::Null) => return Cell::missing(),
        Some(v) => v,
    };

    let number = match (kind.is_numeric(), value.as_f64()) {
        (true, Some(n)) => n,
        _ => return Cell::neutral(text(value)),
    };

    match kind {
        FormatKind::Currency2dp => Cell::neutral(currency_fixed(number, 2, currency)),
        FormatKind::CurrencyInt => {
            Cell::neutral(currency_magnitude(number, options.magnitude, currency))
        }
        FormatKind::PercentSigned => percent_cell(number),
        FormatKind::PlainNumber => Cell::neutral(num::display(&number)),
        FormatKind::Text => Cell::neutral(text(value)),
    }
}

/// Plain rendering: strings unquoted, arrays joined with `", "`.
fn text(value: &Value) -> String {
    match value {
        Value::Null => MISSING.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fmt(value: Value, kind: FormatKind) -> Cell {
        format_cell(Some(&value), kind, &Currency::usd(), &FormatOptions::default())
    }

    #[test]
    fn test_currency_two_decimals() {
        assert_eq!(fmt(json!(50000), FormatKind::Currency2dp).text, "$50,000.00");
        assert_eq!(fmt(json!(0.0345), FormatKind::Currency2dp).text, "$0.03");
        assert_eq!(fmt(json!(-12.5), FormatKind::Currency2dp).text, "-$12.50");
    }

    #[test]
    fn test_currency_without_symbol_uses_code() {
        let cell = format_cell(
            Some(&json!(1234.5)),
            FormatKind::Currency2dp,
            &Currency::new("CHF").unwrap(),
            &FormatOptions::default(),
        );
        assert_eq!(cell.text, "1,234.50 CHF");
    }

    #[test]
    fn test_magnitude_styles() {
        let value = json!(1_234_567_890.4);
        assert_eq!(fmt(value.clone(), FormatKind::CurrencyInt).text, "$1,234,567,890");
        let humanized = format_cell(
            Some(&value),
            FormatKind::CurrencyInt,
            &Currency::usd(),
            &FormatOptions {
                magnitude: MagnitudeStyle::Humanized,
            },
        );
        assert_eq!(humanized.text, "$1.23B");
    }

    #[test]
    fn test_percent_tone() {
        let up = fmt(json!(1.234), FormatKind::PercentSigned);
        assert_eq!(up.text, "+1.23%");
        assert_eq!(up.tone, Tone::Positive);

        let down = fmt(json!(-0.5), FormatKind::PercentSigned);
        assert_eq!(down.text, "-0.50%");
        assert_eq!(down.tone, Tone::Negative);

        let flat = fmt(json!(0), FormatKind::PercentSigned);
        assert_eq!(flat.text, "0.00%");
        assert_eq!(flat.tone, Tone::Neutral);
    }

    #[test]
    fn test_percent_rounding_to_zero_is_neutral() {
        for value in [json!(-0.001), json!(0.004), json!(-0.0049)] {
            let cell = fmt(value, FormatKind::PercentSigned);
            assert_eq!(cell.text, "0.00%");
            assert_eq!(cell.tone, Tone::Neutral);
        }
        let small = fmt(json!(-0.006), FormatKind::PercentSigned);
        assert_eq!(small.text, "-0.01%");
        assert_eq!(small.tone, Tone::Negative);
    }

    #[test]
    fn test_non_percent_cells_are_neutral() {
        assert_eq!(fmt(json!(-3.0), FormatKind::Currency2dp).tone, Tone::Neutral);
        assert_eq!(fmt(json!(-3.0), FormatKind::PlainNumber).tone, Tone::Neutral);
    }

    #[test]
    fn test_missing_and_null() {
        let usd = Currency::usd();
        let opts = FormatOptions::default();
        assert_eq!(format_cell(None, FormatKind::Currency2dp, &usd, &opts), Cell::missing());
        assert_eq!(
            format_cell(Some(&Value::Null), FormatKind::PercentSigned, &usd, &opts),
            Cell::missing()
        );
    }

    #[test]
    fn test_text_and_fallbacks() {
        assert_eq!(fmt(json!("Bitcoin"), FormatKind::Text).text, "Bitcoin");
        assert_eq!(fmt(json!(["mineable", "pow"]), FormatKind::Text).text, "mineable, pow");
        assert_eq!(fmt(json!(1), FormatKind::PlainNumber).text, "1");
        assert_eq!(fmt(json!(19_500_000), FormatKind::PlainNumber).text, "19,500,000");
        // Numeric column holding a string is shown verbatim.
        assert_eq!(fmt(json!("n/a"), FormatKind::Currency2dp).text, "n/a");
    }
}
