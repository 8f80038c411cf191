//! View pipeline: turns a cached snapshot and the current view state into a
//! display-ready table.
//!
//! Stages run in a fixed order: filter, column selection, sort, rename, page
//! slice, format. Every stage is a pure function; nothing here fetches or
//! mutates the snapshot.
//!
//! - [`state`] holds the user-adjustable parameters
//! - [`page`] clamps and slices pages
//! - [`format`] renders cells from their [`FormatKind`](crate::domain::listing::FormatKind)
//! - [`summary`] and [`detail`] build the header figures and the asset panel

pub mod columns;
pub mod detail;
pub mod filter;
pub mod format;
pub mod page;
pub mod sort;
pub mod state;
pub mod summary;

use crate::domain::listing::{AssetQuote, Snapshot};
use serde::{Deserialize, Serialize};

pub use columns::DisplayColumn;
pub use detail::AssetDetail;
pub use format::{Cell, FormatOptions, MagnitudeStyle, Tone};
pub use page::PageInfo;
pub use state::{SortDirection, SortSpec, ViewState};
pub use summary::{MarketSummary, Metric};

/// One formatted row; `cells` line up with [`DisplayTable::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub symbol: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub columns: Vec<DisplayColumn>,
    pub rows: Vec<DisplayRow>,
    /// Carries the clamped page index.
    pub page: PageInfo,
}

impl DisplayTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Rows matching the search, sorted per the view state, before paging.
pub fn visible_rows<'a>(snapshot: &'a Snapshot, view: &ViewState) -> Vec<&'a AssetQuote> {
    let mut rows = filter::filter_rows(&snapshot.rows, &view.search);
    sort::sort_rows(&mut rows, &snapshot.schema, view.sort.as_ref());
    rows
}

/// Renders one page of `snapshot` under `view`.
pub fn render(snapshot: &Snapshot, view: &ViewState, options: &FormatOptions) -> DisplayTable {
    let selected = columns::select_columns(&snapshot.schema, &view.extra_columns);
    let rows = visible_rows(snapshot, view);
    let columns = columns::rename(&selected);

    let page = PageInfo::new(rows.len(), view.page_size, view.page_index);
    let currency = &snapshot.key.currency;

    let rows = page
        .slice(&rows)
        .iter()
        .map(|row| DisplayRow {
            symbol: row.symbol.clone(),
            cells: columns
                .iter()
                .map(|c| format::format_cell(row.get(&c.key), c.kind, currency, options))
                .collect(),
        })
        .collect();

    DisplayTable {
        columns,
        rows,
        page,
    }
}
