//! The search request description and its result envelope.
//!
//! [`QuerySpec`] is a pure, serializable value: building one never performs
//! I/O, and two specs compare structurally so the controller can tell whether
//! an intent actually changes the request. `page` is 0-indexed on the wire;
//! the 1-indexed display page lives in the view layer.

use serde::{Deserialize, Serialize};

use crate::query::clause::{FilterClause, SortClause, SortDirection};

// ===== QuerySpec =====

/// Serializable description of one search request: filters, sort order, and
/// pagination.
///
/// Invariants, enforced by construction and the transition methods:
/// - `per_page > 0`, immutable for the life of the spec;
/// - `page` is the only field pagination mutates;
/// - at most one sort clause per field, sequence order is tie-break
///   precedence;
/// - sort and filter changes restart pagination at the first page, so a
///   result set never mixes new criteria with an old page offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    /// Filter predicates, applied in order.
    search: Vec<FilterClause>,
    /// Sort clauses; first is primary.
    sort: Vec<SortClause>,
    /// 0-indexed page.
    page: u32,
    /// Page size.
    per_page: u32,
}

impl QuerySpec {
    /// Smart constructor: a default spec at page 0 with no filters and no
    /// sort. Returns `None` when `per_page` is zero.
    pub fn new(per_page: u32) -> Option<Self> {
        if per_page == 0 {
            return None;
        }
        Some(QuerySpec {
            search: Vec::new(),
            sort: Vec::new(),
            page: 0,
            per_page,
        })
    }

    /// 0-indexed page this spec requests.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Filter predicates in application order.
    pub fn filters(&self) -> &[FilterClause] {
        &self.search
    }

    /// Sort clauses in precedence order.
    pub fn sort(&self) -> &[SortClause] {
        &self.sort
    }

    /// Same request at a different (0-indexed) page.
    ///
    /// Pagination is the only transition that leaves filters and sort
    /// untouched. Range checking against the known total is the controller's
    /// job; this is a pure value update.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Same filters with sorting on `field` replaced or appended.
    ///
    /// An existing clause for `field` is updated in place, keeping its
    /// tie-break position; otherwise the clause is appended. Resets `page`
    /// to 0.
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        let field = field.into();
        match self.sort.iter_mut().find(|clause| clause.field == field) {
            Some(clause) => clause.direction = direction,
            None => self.sort.push(SortClause { field, direction }),
        }
        self.page = 0;
        self
    }

    /// Same sort with the filter sequence replaced wholesale. Resets `page`
    /// to 0.
    pub fn with_filters(mut self, clauses: Vec<FilterClause>) -> Self {
        self.search = clauses;
        self.page = 0;
        self
    }
}

// ===== ResultEnvelope =====

/// One page of typed records plus the total count across all pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultEnvelope<R> {
    /// Count across all pages, not just the returned one.
    pub total: u64,
    /// The returned page, at most `per_page` records.
    pub results: Vec<R>,
}

impl<R> ResultEnvelope<R> {
    /// An envelope with no results.
    pub fn empty() -> Self {
        ResultEnvelope {
            total: 0,
            results: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
