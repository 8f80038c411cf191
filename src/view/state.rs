//! View state: user-adjustable display parameters, independent of data.

use super::page::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Data key (not the display label).
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// Session-scoped view parameters. Passed into every render; the Terminal
/// writes the clamped page index back after each frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    /// `None` keeps upstream rank order.
    pub sort: Option<SortSpec>,
    /// Zero-based.
    pub page_index: usize,
    pub page_size: usize,
    /// Extra (non-preferred) columns switched on by the user.
    pub extra_columns: BTreeSet<String>,
    pub selected_symbol: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            extra_columns: BTreeSet::new(),
            selected_symbol: None,
        }
    }
}

impl ViewState {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page_index = 0;
        self
    }

    /// New search text; the row count changes, so paging restarts.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page_index = 0;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Sort by `key`; picking the current key again flips the direction.
    pub fn sort_by(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.key == key => Some(SortSpec {
                direction: current.direction.toggled(),
                ..current
            }),
            _ => Some(SortSpec::new(key, SortDirection::Ascending)),
        };
    }

    /// Returns whether the column is now shown.
    pub fn toggle_extra_column(&mut self, key: &str) -> bool {
        if self.extra_columns.remove(key) {
            false
        } else {
            self.extra_columns.insert(key.to_string());
            true
        }
    }

    pub fn select_symbol(&mut self, symbol: Option<String>) {
        self.selected_symbol = symbol;
    }

    pub fn reset_page(&mut self) {
        self.page_index = 0;
    }

    pub fn next_page(&mut self, page: &PageInfo) {
        self.page_index = (self.page_index + 1).min(page.last_index());
    }

    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Jump to a 1-based page number, clamped to the available pages.
    pub fn goto_page(&mut self, number: usize, page: &PageInfo) {
        self.page_index = number.saturating_sub(1).min(page.last_index());
    }
}
