//! Wire types for the listings endpoint (REST).

use crate::error::UpstreamError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw asset record, exactly as returned (nested `quote` included).
pub type AssetRecord = Map<String, Value>;

/// Raw listings payload: `{ "data": [...], "status": {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub data: Vec<AssetRecord>,
    #[serde(default)]
    pub status: Option<ApiStatus>,
}

/// The `status` block attached to every response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub elapsed: Option<u64>,
    #[serde(default)]
    pub credit_count: Option<u32>,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.error_code == 0
    }
}

impl ListingsResponse {
    /// Shape-check a decoded body. A malformed `status` block is dropped; a
    /// missing or non-array `data` is an error. Non-object entries in `data`
    /// are skipped.
    pub fn from_value(value: Value) -> Result<Self, UpstreamError> {
        let mut body = match value {
            Value::Object(body) => body,
            _ => return Err(UpstreamError::MissingData(None)),
        };

        let status = body
            .remove("status")
            .and_then(|s| serde_json::from_value::<ApiStatus>(s).ok());

        let items = match body.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(UpstreamError::MissingData(
                    status.and_then(|s| s.error_message),
                ))
            }
        };

        let total = items.len();
        let data: Vec<AssetRecord> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect();
        if data.len() != total {
            tracing::warn!(
                skipped = total - data.len(),
                "Listings payload contained non-object records"
            );
        }

        Ok(Self { data, status })
    }
}

/// Best-effort `status.error_message` from an error body.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("status")?
        .get("error_message")?
        .as_str()
        .map(str::to_string)
}
