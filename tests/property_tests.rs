//! Property-based tests for the query bridge.

use proptest::prelude::*;

use scanview::model::HostRecord;
use scanview::query::{FilterClause, QuerySpec, ResultEnvelope, ScalarOp, SortDirection};
use scanview::state::{Intent, QueryState};
use scanview::transport::decode_envelope;
use scanview::view_state::{PageInfo, PAGE_WINDOW};

fn loaded_state(total: u64, per_page: u32) -> QueryState<HostRecord> {
    let mut state = QueryState::new(QuerySpec::new(per_page).unwrap());
    let cmd = state.apply(Intent::Refresh).unwrap().unwrap();
    let shown = total.min(u64::from(per_page)) as usize;
    let envelope = ResultEnvelope {
        total,
        results: (0..shown)
            .map(|i| serde_json::from_str(&format!(r#"{{"host": "10.0.0.{i}"}}"#)).unwrap())
            .collect(),
    };
    state.complete_fetch(cmd.token, Ok(envelope));
    state
}

proptest! {
    /// Sorting always restarts pagination, whatever page we were on.
    #[test]
    fn set_sort_resets_page_to_zero(start_page in 0u32..1000, per_page in 1u32..100) {
        let spec = QuerySpec::new(per_page).unwrap().with_page(start_page);
        let sorted = spec.with_sort("host", SortDirection::Asc);
        prop_assert_eq!(sorted.page(), 0);
    }

    /// Filtering always restarts pagination, whatever page we were on.
    #[test]
    fn set_filters_resets_page_to_zero(start_page in 0u32..1000, per_page in 1u32..100) {
        let spec = QuerySpec::new(per_page).unwrap().with_page(start_page);
        let filtered = spec.with_filters(
            vec![FilterClause::scalar("host", ScalarOp::Eq, "10.0.0.1")],
        );
        prop_assert_eq!(filtered.page(), 0);
    }

    /// Any decoded envelope satisfies `len(results) <= per_page` and
    /// `total >= len(results)`; bodies violating either are rejected.
    #[test]
    fn decoded_envelopes_satisfy_invariants(
        total in 0u64..10_000,
        returned in 0usize..40,
        per_page in 1u32..30,
    ) {
        let results: Vec<serde_json::Value> = (0..returned)
            .map(|i| serde_json::json!({"host": format!("10.0.0.{i}")}))
            .collect();
        let body = serde_json::json!({"total": total, "results": results}).to_string();

        match decode_envelope::<HostRecord>(&body, per_page) {
            Ok(envelope) => {
                prop_assert!(envelope.results.len() <= per_page as usize);
                prop_assert!(envelope.total >= envelope.results.len() as u64);
            }
            Err(err) => {
                let violates = returned > per_page as usize || total < returned as u64;
                prop_assert!(violates, "valid body rejected: {err}");
            }
        }
    }

    /// `SetPage` is a no-op (no state change, no fetch) outside the valid
    /// range for the current total.
    #[test]
    fn out_of_range_pages_are_rejected_without_mutation(
        total in 0u64..500,
        page in 0u32..100,
    ) {
        let mut state = loaded_state(total, 10);
        let spec_before = state.spec().clone();
        let total_pages = state.total_pages();

        let outcome = state.apply(Intent::SetPage(page));

        if page >= 1 && page <= total_pages {
            prop_assert!(outcome.is_ok());
        } else {
            prop_assert!(outcome.is_err());
            prop_assert_eq!(state.spec(), &spec_before);
            prop_assert!(!state.loading());
        }
    }

    /// Pagination window never exceeds five buttons, and the ellipsis shows
    /// exactly when pages exist beyond the window.
    #[test]
    fn page_window_is_bounded(total in 0u64..100_000, page_size in 1u32..100) {
        let info = PageInfo { page: 1, page_size, total };
        let window = info.window();
        prop_assert!(window.pages.len() as u32 <= PAGE_WINDOW);
        prop_assert_eq!(window.ellipsis, info.total_pages() > PAGE_WINDOW);
        // Buttons always count up from one.
        for (i, page) in window.pages.iter().enumerate() {
            prop_assert_eq!(*page, i as u32 + 1);
        }
    }

    /// The display range never escapes `[1, total]` and is monotone in the
    /// page number.
    #[test]
    fn shown_range_stays_within_total(
        total in 1u64..10_000,
        page_size in 1u32..100,
    ) {
        let info = PageInfo { page: 1, page_size, total };
        let last = info.total_pages();
        for page in 1..=last.min(20) {
            let info = PageInfo { page, page_size, total };
            let (from, to) = info.shown_range().unwrap();
            prop_assert!(from >= 1);
            prop_assert!(from <= to);
            prop_assert!(to <= total);
        }
    }
}

/// Completion-order shuffling: whatever order completions arrive in, the
/// rows displayed afterwards are the ones from the newest request.
#[test]
fn newest_request_wins_under_any_completion_order() {
    use scanview::model::TransportError;

    // Three overlapping fetches; try every completion order.
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        let mut state = loaded_state(50, 10);
        let commands = [
            state.apply(Intent::SetPage(2)).unwrap().unwrap(),
            state.apply(Intent::SetPage(3)).unwrap().unwrap(),
            state.apply(Intent::SetPage(4)).unwrap().unwrap(),
        ];

        for &i in &order {
            let result = if i == 1 {
                Err(TransportError::HttpStatus { status: 500 })
            } else {
                Ok(ResultEnvelope {
                    total: 50,
                    results: vec![serde_json::from_str(&format!(
                        r#"{{"host": "10.0.{i}.1"}}"#
                    ))
                    .unwrap()],
                })
            };
            state.complete_fetch(commands[i].token, result);
        }

        // Only the last-issued fetch may have installed anything.
        assert_eq!(state.display_page(), 4, "order {order:?}");
        assert_eq!(
            state.rows()[0].host.as_deref(),
            Some("10.0.2.1"),
            "order {order:?}"
        );
    }
}
