//! Window execution: page fetch plus count, run concurrently, then sentinel
//! trimming.

use pager_core::{
    CollectionDescriptor, Direction, DocumentSnapshot, DocumentStore, Filters, PageRequest,
};
use tracing::debug;

use super::constraints::page_query;
use super::count::count_matching;
use crate::error::PageError;

/// Raw records of one window, already trimmed to at most `page_size`, and
/// the count estimate taken alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Trimmed records, in sort order.
    pub records: Vec<DocumentSnapshot>,
    /// Whether the store returned a sentinel, i.e. more records exist past
    /// the page in the fetch direction.
    pub has_more: bool,
    /// Approximate number of matching documents.
    pub total_items: u64,
}

/// Fetches one window and the matching count.
///
/// Both store round trips are in flight at the same time and both finish
/// before this returns, so latency is bounded by the slower one.
///
/// # Errors
///
/// Returns [`PageError::Fetch`] if the page query fails. Count failures
/// never surface here.
pub async fn execute_window(
    store: &dyn DocumentStore,
    descriptor: &CollectionDescriptor,
    filters: &Filters,
    request: &PageRequest,
) -> Result<Window, PageError> {
    let query = page_query(descriptor, filters, request);
    debug!(
        collection = descriptor.name(),
        constraints = ?query.constraints,
        "issuing page window"
    );

    let (page, total_items) = tokio::join!(
        store.execute(&query),
        count_matching(store, descriptor, filters),
    );

    let snapshot = page.map_err(|source| PageError::Fetch {
        collection: descriptor.name().to_string(),
        source,
    })?;

    let page_size = request.page_size as usize;
    let has_more = snapshot.records.len() > page_size;
    let records = trim_sentinel(snapshot.records, request.direction, page_size);

    Ok(Window {
        records,
        has_more,
        total_items,
    })
}

/// Drops the over-fetched sentinel record(s).
///
/// Forward windows are head-anchored, so the surplus sits at the end.
/// Backward windows are tail-anchored, so the surplus sits at the start.
/// A window of `page_size` records or fewer is the last one in its
/// direction and is returned untouched.
#[must_use]
pub fn trim_sentinel(
    mut records: Vec<DocumentSnapshot>,
    direction: Direction,
    page_size: usize,
) -> Vec<DocumentSnapshot> {
    if records.len() <= page_size {
        return records;
    }
    match direction {
        Direction::Forward => records.truncate(page_size),
        Direction::Backward => {
            let surplus = records.len() - page_size;
            records.drain(..surplus);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::pagination::test_support::{snapshot, PageScript, ScriptedStore};

    fn ids(records: &[DocumentSnapshot]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn records(ids: &[&str]) -> Vec<DocumentSnapshot> {
        ids.iter().map(|id| snapshot(id)).collect()
    }

    fn request(direction: Direction) -> PageRequest {
        PageRequest {
            direction,
            page_size: 3,
            cursor: None,
            current_offset: 0,
        }
    }

    #[test]
    fn forward_drops_last_record() {
        let trimmed = trim_sentinel(records(&["a", "b", "c", "d"]), Direction::Forward, 3);
        assert_eq!(ids(&trimmed), vec!["a", "b", "c"]);
    }

    #[test]
    fn backward_drops_first_record() {
        let trimmed = trim_sentinel(records(&["a", "b", "c", "d"]), Direction::Backward, 3);
        assert_eq!(ids(&trimmed), vec!["b", "c", "d"]);
    }

    #[test]
    fn short_window_is_untouched() {
        for direction in [Direction::Forward, Direction::Backward] {
            let trimmed = trim_sentinel(records(&["a", "b"]), direction, 3);
            assert_eq!(ids(&trimmed), vec!["a", "b"]);
            let exact = trim_sentinel(records(&["a", "b", "c"]), direction, 3);
            assert_eq!(ids(&exact), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn oversized_window_is_cut_to_page_size() {
        let forward = trim_sentinel(records(&["a", "b", "c", "d", "e"]), Direction::Forward, 3);
        assert_eq!(ids(&forward), vec!["a", "b", "c"]);
        let backward = trim_sentinel(records(&["a", "b", "c", "d", "e"]), Direction::Backward, 3);
        assert_eq!(ids(&backward), vec!["c", "d", "e"]);
    }

    #[tokio::test]
    async fn window_returns_trimmed_records_and_count() {
        let store = ScriptedStore::new()
            .with_records(&["a", "b", "c", "d"])
            .with_total(42);
        let window = execute_window(
            &store,
            &CollectionDescriptor::available_items(),
            &Filters::new(),
            &request(Direction::Forward),
        )
        .await
        .unwrap();

        assert_eq!(ids(&window.records), vec!["a", "b", "c"]);
        assert!(window.has_more);
        assert_eq!(window.total_items, 42);
        assert_eq!(store.page_queries().len(), 1);
    }

    #[tokio::test]
    async fn short_window_has_no_more() {
        let store = ScriptedStore::new().with_records(&["a", "b"]).with_total(2);
        let window = execute_window(
            &store,
            &CollectionDescriptor::available_items(),
            &Filters::new(),
            &request(Direction::Forward),
        )
        .await
        .unwrap();

        assert_eq!(ids(&window.records), vec!["a", "b"]);
        assert!(!window.has_more);
    }

    #[tokio::test]
    async fn page_failure_propagates_even_when_count_succeeds() {
        let store = ScriptedStore::new().with_page(PageScript::Fail).with_total(9);
        let err = execute_window(
            &store,
            &CollectionDescriptor::sold_items(),
            &Filters::new(),
            &request(Direction::Backward),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PageError::Fetch { ref collection, .. } if collection == "items"));
        assert_eq!(store.aggregate_calls(), 1, "count still ran to completion");
    }

    #[tokio::test(start_paused = true)]
    async fn page_and_count_run_concurrently() {
        let store = ScriptedStore::new()
            .with_records(&["a"])
            .with_total(1)
            .with_delay(Duration::from_millis(100));

        let started = tokio::time::Instant::now();
        execute_window(
            &store,
            &CollectionDescriptor::available_items(),
            &Filters::new(),
            &request(Direction::Forward),
        )
        .await
        .unwrap();

        assert!(started.elapsed() < Duration::from_millis(200));
    }
}
