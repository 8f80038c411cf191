//! Frame: everything one tick produces for display.

use crate::domain::listing::wire::ApiStatus;
use crate::error::TerminalError;
use crate::shared::SnapshotKey;
use crate::view::{AssetDetail, DisplayTable, MarketSummary, Metric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    /// Displayed data is empty; not a failure.
    EmptyResultWarning,
}

/// A user-visible message attached to the frame that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// Whether a front end may hide it until the next tick.
    pub dismissible: bool,
}

impl Notice {
    pub fn from_error(error: &TerminalError) -> Self {
        Self {
            severity: Severity::Error,
            message: format!("Failed to fetch data: {}", error),
            dismissible: error.is_recoverable(),
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::EmptyResultWarning,
            message: message.into(),
            dismissible: true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Footer data: when the snapshot was fetched and what upstream reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLine {
    pub fetched_at: DateTime<Utc>,
    pub error_code: i64,
    pub credit_count: Option<u32>,
}

impl StatusLine {
    pub fn new(fetched_at: DateTime<Utc>, status: Option<&ApiStatus>) -> Self {
        Self {
            fetched_at,
            error_code: status.map(|s| s.error_code).unwrap_or_default(),
            credit_count: status.and_then(|s| s.credit_count),
        }
    }

    /// `"OK"` for a zero code, the code itself otherwise.
    pub fn api_status(&self) -> String {
        if self.error_code == 0 {
            "OK".to_string()
        } else {
            self.error_code.to_string()
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Data time: {} | CMC status: {}",
            self.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.api_status()
        )?;
        if let Some(credits) = self.credit_count {
            write!(f, " | credits: {}", credits)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub key: SnapshotKey,
    /// `None` when no snapshot could be shown at all.
    pub table: Option<DisplayTable>,
    pub summary: Option<MarketSummary>,
    pub metrics: Vec<Metric>,
    pub detail: Option<AssetDetail>,
    /// Symbols the detail panel can select from.
    pub symbol_options: Vec<String>,
    pub status: Option<StatusLine>,
    pub notices: Vec<Notice>,
    /// Rendered from an expired snapshot after a failed refresh.
    pub stale: bool,
    pub rendered_at: DateTime<Utc>,
}

impl Frame {
    pub(crate) fn blank(key: SnapshotKey) -> Self {
        Self {
            key,
            table: None,
            summary: None,
            metrics: Vec::new(),
            detail: None,
            symbol_options: Vec::new(),
            status: None,
            notices: Vec::new(),
            stale: false,
            rendered_at: Utc::now(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.table.is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_error())
    }
}
