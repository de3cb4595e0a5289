//! Derived display values for the paginated table (pure).
//!
//! This is the one-way data contract between the controller and the
//! renderer: the renderer receives rows, total, loading flag, and the
//! current page, computes everything else here, and emits intents only. It
//! holds no authoritative state of its own.

// ===== PageInfo =====

/// Pagination facts the renderer derives its controls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 1-indexed for display.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
    /// Total records across all pages.
    pub total: u64,
}

/// How many page-number controls are shown at most.
///
/// The window is fixed to the first pages; it does not recenter on the
/// current page for large result sets.
pub const PAGE_WINDOW: u32 = 5;

impl PageInfo {
    /// Number of pages, rounding up.
    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(u64::from(self.page_size)) as u32
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// The visible page-number controls: pages `1..=min(5, total_pages)`,
    /// plus an ellipsis marker when more pages exist beyond the window.
    pub fn window(&self) -> PageWindow {
        let total_pages = self.total_pages();
        let shown = total_pages.min(PAGE_WINDOW);
        PageWindow {
            pages: (1..=shown).collect(),
            ellipsis: total_pages > PAGE_WINDOW,
        }
    }

    /// The 1-indexed record range the current page shows, for a
    /// "Showing X to Y of Z" line. `None` when there is nothing to show.
    pub fn shown_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let from = u64::from(self.page - 1) * u64::from(self.page_size) + 1;
        let to = (u64::from(self.page) * u64::from(self.page_size)).min(self.total);
        Some((from, to))
    }
}

/// Visible page-number controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Page numbers to render as buttons.
    pub pages: Vec<u32>,
    /// Whether to render a trailing ellipsis marker.
    pub ellipsis: bool,
}

// ===== TableContent =====

/// What the table body renders.
///
/// Loading shows a placeholder row without clearing the previously fetched
/// rows from state; an empty result set is an explicit empty state, not an
/// error and not a loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableContent {
    /// A fetch is outstanding; render a placeholder row.
    Loading,
    /// The query matched nothing.
    Empty,
    /// Render the rows from the last successful fetch.
    Rows,
}

impl TableContent {
    /// Pick the body state from the controller's observable flags.
    pub fn select(loading: bool, row_count: usize) -> Self {
        if loading {
            TableContent::Loading
        } else if row_count == 0 {
            TableContent::Empty
        } else {
            TableContent::Rows
        }
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
