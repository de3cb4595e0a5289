//! Query state controller (pure).
//!
//! [`QueryState`] is the state machine binding UI intents to fetches and
//! fetches to displayed data. Applying an intent is a pure transition that
//! may yield a [`FetchCommand`]; the impure shell executes commands and posts
//! the outcome back through [`QueryState::complete_fetch`].
//!
//! Overlapping fetches are resolved by a monotonically increasing request
//! token: every issued fetch bumps the token, and a completion is discarded
//! unless it carries the current one. Completion order is not guaranteed by
//! the transport, so last-request-wins only holds because of this guard - a
//! slow, superseded response must never overwrite the state a newer one
//! already installed.

use tracing::{debug, warn};

use crate::model::{IntentError, Resource, TransportError};
use crate::query::{FilterClause, QuerySpec, ResultEnvelope, SortDirection};

// ===== Intents =====

/// A UI intent against the query state.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Navigate to a 1-indexed display page.
    SetPage(u32),
    /// Replace or append the sort clause for `field`, restarting at the
    /// first page.
    SetSort {
        /// Attribute to sort by.
        field: String,
        /// Sort direction.
        direction: SortDirection,
    },
    /// Replace the filter sequence wholesale, restarting at the first page.
    SetFilters(Vec<FilterClause>),
    /// Re-fetch the current spec unconditionally (initial load, manual
    /// reload).
    Refresh,
}

/// An issued fetch: the spec to request and the token its completion must
/// present.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCommand {
    /// Token identifying this fetch.
    pub token: u64,
    /// Snapshot of the spec to request.
    pub spec: QuerySpec,
}

// ===== QueryState =====

/// Client-side query state for one table view of resource `R`.
///
/// Owned exclusively by the controller loop; the renderer and the transport
/// never mutate it. Created on view mount with a default spec, discarded on
/// unmount.
#[derive(Debug, Clone)]
pub struct QueryState<R: Resource> {
    spec: QuerySpec,
    data: Option<ResultEnvelope<R>>,
    loading: bool,
    request_token: u64,
    last_error: Option<TransportError>,
}

impl<R: Resource> QueryState<R> {
    /// New state around a default spec. No fetch is issued here; mount with
    /// [`Intent::Refresh`].
    pub fn new(spec: QuerySpec) -> Self {
        QueryState {
            spec,
            data: None,
            loading: false,
            request_token: 0,
            last_error: None,
        }
    }

    /// The current request description.
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Rows from the last successful fetch. Retained across failures and
    /// while a newer fetch is loading.
    pub fn rows(&self) -> &[R] {
        self.data.as_ref().map(|d| d.results.as_slice()).unwrap_or(&[])
    }

    /// Last known total across all pages; 0 before the first successful
    /// fetch.
    pub fn total(&self) -> u64 {
        self.data.as_ref().map(|d| d.total).unwrap_or(0)
    }

    /// Whether a fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Whether any successful fetch has completed yet.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Error of the most recent completed fetch, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// Current page, 1-indexed for display.
    pub fn display_page(&self) -> u32 {
        self.spec.page() + 1
    }

    /// Number of pages given the last known total.
    pub fn total_pages(&self) -> u32 {
        let per_page = u64::from(self.spec.per_page());
        self.total().div_ceil(per_page) as u32
    }

    /// Apply a UI intent.
    ///
    /// Returns `Ok(Some(command))` when a fetch must be issued,
    /// `Ok(None)` when the intent is a no-op (the resulting spec equals the
    /// current one and the last fetch succeeded), and `Err` when the intent
    /// is rejected locally with no state change, no token bump, and no fetch.
    pub fn apply(&mut self, intent: Intent) -> Result<Option<FetchCommand>, IntentError> {
        match intent {
            Intent::SetPage(page) => {
                let total_pages = self.total_pages();
                if page < 1 || page > total_pages {
                    return Err(IntentError::PageOutOfRange {
                        requested: page,
                        total_pages,
                    });
                }
                // Wire pages are 0-indexed.
                let next = self.spec.clone().with_page(page - 1);
                Ok(self.issue_if_changed(next))
            }
            Intent::SetSort { field, direction } => {
                if !R::is_queryable(&field) {
                    return Err(IntentError::UnknownField {
                        field,
                        resource: R::NAME,
                    });
                }
                let next = self.spec.clone().with_sort(field, direction);
                Ok(self.issue_if_changed(next))
            }
            Intent::SetFilters(clauses) => {
                if let Some(clause) = clauses.iter().find(|c| !R::is_queryable(c.field())) {
                    return Err(IntentError::UnknownField {
                        field: clause.field().to_string(),
                        resource: R::NAME,
                    });
                }
                let next = self.spec.clone().with_filters(clauses);
                Ok(self.issue_if_changed(next))
            }
            Intent::Refresh => Ok(Some(self.issue())),
        }
    }

    /// Record the outcome of a fetch. Returns `true` when the completion was
    /// accepted, `false` when it was stale and discarded.
    ///
    /// On failure the previously displayed data is retained and the error
    /// surfaced; stale-but-valid beats blank screen.
    pub fn complete_fetch(
        &mut self,
        token: u64,
        result: Result<ResultEnvelope<R>, TransportError>,
    ) -> bool {
        if token != self.request_token {
            debug!(
                stale = token,
                current = self.request_token,
                "discarding stale fetch completion"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(envelope) => {
                self.data = Some(envelope);
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "search request failed");
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Install `next` and issue a fetch unless it is a no-op.
    ///
    /// The equality guard is bypassed while an error is showing: re-issuing
    /// the same intent is the documented remedy for a failed fetch.
    fn issue_if_changed(&mut self, next: QuerySpec) -> Option<FetchCommand> {
        if next == self.spec && self.last_error.is_none() {
            return None;
        }
        self.spec = next;
        Some(self.issue())
    }

    /// Bump the token and produce the command for the current spec.
    fn issue(&mut self) -> FetchCommand {
        self.request_token += 1;
        self.loading = true;
        FetchCommand {
            token: self.request_token,
            spec: self.spec.clone(),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
