//! Page slicing.

use serde::{Deserialize, Serialize};

/// Where a rendered page sits in the filtered row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Zero-based, already clamped.
    pub index: usize,
    pub size: usize,
    /// Always at least 1, even with no rows.
    pub total_pages: usize,
    pub total_rows: usize,
}

impl PageInfo {
    /// Clamps `requested` into `[0, total_pages - 1]`. A zero page size is
    /// treated as 1.
    pub fn new(total_rows: usize, size: usize, requested: usize) -> Self {
        let size = size.max(1);
        let total_pages = total_rows.div_ceil(size).max(1);
        Self {
            index: requested.min(total_pages - 1),
            size,
            total_pages,
            total_rows,
        }
    }

    /// 1-based page number for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn last_index(&self) -> usize {
        self.total_pages - 1
    }

    /// Row range covered by this page.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.index * self.size).min(self.total_rows);
        let end = (start + self.size).min(self.total_rows);
        start..end
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(rows.len());
        &rows[range.start.min(end)..end]
    }
}

impl std::fmt::Display for PageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page {}/{} | {} rows",
            self.number(),
            self.total_pages,
            self.total_rows
        )
    }
}
