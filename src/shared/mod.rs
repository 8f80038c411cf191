//! Shared newtypes and utilities used across the domain and view layers.
//!
//! These types are serialization-transparent: they serialize/deserialize as the
//! raw strings and numbers the listings endpoint uses.

pub mod fmt;

use crate::error::TerminalError;
use crate::network::UPSTREAM_MAX_LIMIT;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Currency ────────────────────────────────────────────────────────────────

/// Conversion currency code (e.g. `"USD"`), trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self, TerminalError> {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TerminalError::Validation(format!(
                "Invalid currency code: {:?}",
                code
            )));
        }
        Ok(Self(code))
    }

    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix used for this currency's flattened quote keys (`"USD_"`).
    pub fn field_prefix(&self) -> String {
        format!("{}_", self.0)
    }

    /// Flattened key for a quote field (`"USD_price"`).
    pub fn field(&self, quote_key: &str) -> String {
        format!("{}_{}", self.0, quote_key)
    }

    /// Display symbol, if the currency has a conventional one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "USD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" | "CNY" => Some("¥"),
            _ => None,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Currency::new(&s).map_err(serde::de::Error::custom)
    }
}

// ─── SnapshotKey ─────────────────────────────────────────────────────────────

/// Request parameters that identify a snapshot: rank window and currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub limit: u32,
    pub currency: Currency,
}

impl SnapshotKey {
    pub fn new(limit: u32, currency: &str) -> Result<Self, TerminalError> {
        if limit == 0 || limit > UPSTREAM_MAX_LIMIT {
            return Err(TerminalError::Validation(format!(
                "limit must be in 1..={}, got {}",
                UPSTREAM_MAX_LIMIT, limit
            )));
        }
        Ok(Self {
            limit,
            currency: Currency::new(currency)?,
        })
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "top {} in {}", self.limit, self.currency)
    }
}
