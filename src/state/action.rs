//! Semantic UI actions.
//!
//! The view maps raw key events to these; state handlers never see key
//! codes, which keeps every transition testable without a terminal.

/// One user action against the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Quit the application.
    Quit,
    /// Give the search input keyboard focus.
    FocusSearch,
    /// Append a character to the search input.
    InputChar(char),
    /// Delete the character before the cursor.
    InputBackspace,
    /// Submit the search input as a filter.
    SubmitSearch,
    /// Leave the search input without submitting.
    CancelSearch,
    /// Go to the next page.
    NextPage,
    /// Go to the previous page.
    PrevPage,
    /// Jump to a 1-indexed page.
    GotoPage(u32),
    /// Move sorting to the next sortable column (ascending).
    CycleSortColumn,
    /// Flip the direction of the current sort column.
    ToggleSortDirection,
    /// Re-fetch the current query.
    Refresh,
}
