//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values with thousands separators, fixed or auto-detected
//! decimal places, signed percentages and abbreviated suffixes (K/M/B/T).

/// Inserts thousands separators into an already formatted number, keeping the
/// fractional part untouched.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };
    let grouped = group_thousands(&trimmed);
    if grouped == "-0" {
        "0".to_string()
    } else {
        grouped
    }
}

fn get_decimal_places(value: f64) -> usize {
    let abs_value = value.abs();

    if abs_value >= 100.0 {
        return 0;
    }

    if abs_value >= 1.0 {
        return 2;
    }

    if abs_value == 0.0 {
        return 2;
    }

    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format an f64 for display with auto-detected decimal places.
pub fn display(amount: &f64) -> String {
    display_with_decimals(amount, get_decimal_places(*amount))
}

/// Format an f64 for display with explicit decimal places.
pub fn display_with_decimals(amount: &f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", amount, decimals);
    display_formatted_string(formatted)
}

/// Format with exactly `decimals` places and thousands separators
/// (`1234.5` → `"1,234.50"`).
pub fn fixed(amount: f64, decimals: usize) -> String {
    let formatted = group_thousands(&format!("{:.1$}", amount, decimals));
    match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.' || c == ',') => rest.to_string(),
        _ => formatted,
    }
}

/// Abbreviate with a K/M/B/T suffix and two decimals. Values below one
/// thousand are rounded to whole units.
pub fn humanize(amount: f64) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    let abs_value = amount.abs();
    for (scale, suffix) in SUFFIXES {
        if abs_value >= scale {
            return format!("{}{}", fixed(amount / scale, 2), suffix);
        }
    }
    fixed(amount, 0)
}

/// Signed percentage with two decimals (`+1.23%`, `-0.50%`, `0.00%`).
pub fn percent_signed(value: f64) -> String {
    let body = fixed(value.abs(), 2);
    if body.chars().all(|c| c == '0' || c == '.' || c == ',') {
        return format!("{}%", body);
    }
    if value > 0.0 {
        format!("+{}%", body)
    } else {
        format!("-{}%", body)
    }
}

/// Prefix a formatted amount with a currency symbol, or suffix the currency
/// code when it has none. Keeps the sign in front.
pub fn with_currency(formatted: String, symbol: Option<&str>, code: &str) -> String {
    match symbol {
        Some(sym) => match formatted.strip_prefix('-') {
            Some(rest) => format!("-{}{}", sym, rest),
            None => format!("{}{}", sym, formatted),
        },
        None => format!("{} {}", formatted, code),
    }
}
