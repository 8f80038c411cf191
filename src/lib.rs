//! # cmc-terminal
//!
//! A CoinMarketCap listings dashboard: fetch the latest listings, flatten
//! them into tabular snapshots, cache them per request, and render pages of
//! formatted rows.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Currency and snapshot keys, listing domain (flattening, schema, cache)
//! 2. **HTTP**: `CmcHttp`, the default `ListingsSource` (feature `http`)
//! 3. **High-Level Client**: `CmcClient` with the listings sub-client and the shared TTL cache
//! 4. **View**: pure render pipeline: filter, columns, sort, page, format
//! 5. **Terminal**: ticks, frames, notices and auto refresh
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cmc_terminal::prelude::*;
//!
//! let client = CmcClient::builder().api_key("...").build()?;
//! let mut terminal = Terminal::new(client, TerminalOptions::default())?;
//!
//! terminal.view_mut().set_search("bt");
//! let frame = terminal.tick().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all layers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, cache.
pub mod domain;

/// Crate error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// HTTP fetcher for the listings endpoint.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CmcClient`: the primary entry point.
pub mod client;

// ── Layer 4: View ────────────────────────────────────────────────────────────

/// Snapshot → display table.
pub mod view;

// ── Layer 5: Terminal ────────────────────────────────────────────────────────

/// Dashboard driver.
pub mod terminal;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Currency, SnapshotKey};

    // Domain types: listing
    pub use crate::domain::listing::wire::{ApiStatus, ListingsResponse};
    pub use crate::domain::listing::{
        AssetQuote, ColumnRole, ColumnSpec, FormatKind, ListingsSource, Schema, Snapshot,
    };

    // Errors
    pub use crate::error::{ConfigError, TerminalError, UpstreamError};

    // Network
    pub use crate::network::DEFAULT_LISTINGS_URL;

    // Client + sub-clients
    pub use crate::client::{CmcClient, CmcClientBuilder, ListingsClient};
    #[cfg(feature = "http")]
    pub use crate::http::CmcHttp;

    // View
    pub use crate::view::{
        render, AssetDetail, Cell, DisplayColumn, DisplayRow, DisplayTable, FormatOptions,
        MagnitudeStyle, MarketSummary, Metric, PageInfo, SortDirection, SortSpec, Tone, ViewState,
    };

    // Terminal
    pub use crate::terminal::{
        Frame, Notice, RefreshTimer, Severity, StatusLine, Terminal, TerminalOptions,
    };
}
