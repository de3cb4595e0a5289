//! Root TUI state and action dispatch.
//!
//! [`AppState`] wraps the [`QueryState`] controller with the view-local
//! state a table screen needs: the search input buffer, which widget has
//! focus, the sort cursor over the sortable columns, and a transient notice
//! line. All transitions are pure; the event loop executes whatever
//! [`FetchCommand`] falls out.

use tracing::debug;

use crate::model::Resource;
use crate::query::{FilterClause, ScalarOp, SortDirection};
use crate::state::action::UiAction;
use crate::state::controller::{FetchCommand, Intent, QueryState};

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Keys drive the table (pagination, sorting).
    Table,
    /// Keys edit the search input.
    SearchInput,
}

/// Application state for one table screen of resource `R`.
#[derive(Debug, Clone)]
pub struct AppState<R: Resource> {
    /// The query/pagination/sort controller.
    pub query: QueryState<R>,
    input: String,
    focus: Focus,
    filter_field: &'static str,
    sortable: &'static [&'static str],
    sort_cursor: Option<usize>,
    sort_direction: SortDirection,
    notice: Option<String>,
    should_quit: bool,
}

impl<R: Resource> AppState<R> {
    /// New screen state.
    ///
    /// `filter_field` is the attribute the search box filters on;
    /// `sortable` the columns the sort keys cycle through. Both must be
    /// queryable attributes of `R`.
    pub fn new(
        query: QueryState<R>,
        filter_field: &'static str,
        sortable: &'static [&'static str],
    ) -> Self {
        debug_assert!(R::is_queryable(filter_field));
        debug_assert!(sortable.iter().all(|f| R::is_queryable(f)));
        AppState {
            query,
            input: String::new(),
            focus: Focus::Table,
            filter_field,
            sortable,
            sort_cursor: None,
            sort_direction: SortDirection::Asc,
            notice: None,
            should_quit: false,
        }
    }

    /// Current search input contents.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Pre-fill the search input (e.g. from a CLI flag).
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Which widget has focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Transient status line (rejected intents, fetch errors are read off
    /// the controller directly).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The column sorting currently cycles on, if any.
    pub fn current_sort(&self) -> Option<(&'static str, SortDirection)> {
        self.sort_cursor
            .map(|i| (self.sortable[i], self.sort_direction))
    }

    /// Apply one UI action, possibly yielding a fetch to execute.
    pub fn dispatch(&mut self, action: UiAction) -> Option<FetchCommand> {
        match action {
            UiAction::Quit => {
                self.should_quit = true;
                None
            }
            UiAction::FocusSearch => {
                self.focus = Focus::SearchInput;
                None
            }
            UiAction::InputChar(c) => {
                if self.focus == Focus::SearchInput {
                    self.input.push(c);
                }
                None
            }
            UiAction::InputBackspace => {
                if self.focus == Focus::SearchInput {
                    self.input.pop();
                }
                None
            }
            UiAction::CancelSearch => {
                self.focus = Focus::Table;
                None
            }
            UiAction::SubmitSearch => {
                self.focus = Focus::Table;
                let clauses = self.filter_clauses();
                self.intend(Intent::SetFilters(clauses), true)
            }
            UiAction::NextPage => {
                let next = self.query.display_page() + 1;
                // Boundary bumps are ignored, like a disabled button.
                self.intend(Intent::SetPage(next), false)
            }
            UiAction::PrevPage => {
                let current = self.query.display_page();
                if current <= 1 {
                    return None;
                }
                self.intend(Intent::SetPage(current - 1), false)
            }
            UiAction::GotoPage(page) => self.intend(Intent::SetPage(page), true),
            UiAction::CycleSortColumn => {
                if self.sortable.is_empty() {
                    return None;
                }
                let next = match self.sort_cursor {
                    Some(i) => (i + 1) % self.sortable.len(),
                    None => 0,
                };
                self.sort_cursor = Some(next);
                self.sort_direction = SortDirection::Asc;
                self.intend(
                    Intent::SetSort {
                        field: self.sortable[next].to_string(),
                        direction: SortDirection::Asc,
                    },
                    true,
                )
            }
            UiAction::ToggleSortDirection => {
                let (field, direction) = self.current_sort()?;
                self.sort_direction = direction.toggled();
                self.intend(
                    Intent::SetSort {
                        field: field.to_string(),
                        direction: self.sort_direction,
                    },
                    true,
                )
            }
            UiAction::Refresh => self.intend(Intent::Refresh, true),
        }
    }

    /// Filter clauses for the current input: empty input clears filtering,
    /// anything else is an exact match on the screen's filter field.
    fn filter_clauses(&self) -> Vec<FilterClause> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![FilterClause::scalar(
                self.filter_field,
                ScalarOp::Eq,
                trimmed,
            )]
        }
    }

    /// Route an intent through the controller, turning rejections into the
    /// notice line when `surface_rejection` is set.
    fn intend(&mut self, intent: Intent, surface_rejection: bool) -> Option<FetchCommand> {
        match self.query.apply(intent) {
            Ok(command) => {
                self.notice = None;
                command
            }
            Err(err) => {
                if surface_rejection {
                    self.notice = Some(err.to_string());
                } else {
                    debug!(error = %err, "intent ignored");
                }
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
