//! Result assembly: items, boundary cursors, synthetic offsets, pager flags.
//!
//! The synthetic offset is a view-layer value the store knows nothing about.
//! It is derived here from the request and the number of items actually
//! returned, and nowhere else.

use pager_core::{Direction, Item, PageCursors, PageMeta, PageRequest, PageResult};

use super::window::Window;

/// Offsets for a page of `count` items fetched by `request`.
///
/// Returns `(offset, current_offset)`: the offset to continue forward from,
/// and the offset of this page's first item.
#[must_use]
pub fn derive_offsets(request: &PageRequest, count: usize) -> (u64, u64) {
    match request.direction {
        Direction::Forward => (
            request.current_offset.saturating_add(count as u64),
            request.current_offset,
        ),
        Direction::Backward => {
            let offset = request
                .current_offset
                .saturating_sub(u64::from(request.page_size));
            (offset, offset)
        }
    }
}

/// Builds the page result for a trimmed window.
#[must_use]
pub fn assemble_result(request: &PageRequest, window: Window) -> PageResult {
    let Window {
        records,
        has_more,
        total_items: estimate,
    } = window;

    let cursors = PageCursors {
        start: records.first().map(|r| r.cursor.clone()),
        end: records.last().map(|r| r.cursor.clone()),
    };
    let items: Vec<Item> = records.into_iter().map(Item::from).collect();
    let count = items.len();

    let (offset, current_offset) = derive_offsets(request, count);
    let seen = current_offset.saturating_add(count as u64);

    // The estimate may be zero (counting failed) or stale. It is never
    // allowed below what this window proves exists, including the trimmed
    // forward sentinel.
    let proven = seen.saturating_add(u64::from(
        has_more && request.direction == Direction::Forward,
    ));
    let total_items = estimate.max(proven);

    PageResult {
        items,
        page_meta: PageMeta {
            page_size: request.page_size,
            count,
            has_next: total_items > seen,
            has_prev: current_offset > 0,
            cursors,
        },
        offset,
        current_offset,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use pager_core::DocumentSnapshot;

    use super::*;
    use crate::pagination::test_support::{cursor, snapshot};

    fn request(direction: Direction, page_size: u32, current_offset: u64) -> PageRequest {
        PageRequest {
            direction,
            page_size,
            cursor: None,
            current_offset,
        }
    }

    fn window(ids: &[&str], total_items: u64) -> Window {
        Window {
            records: ids.iter().map(|id| snapshot(id)).collect::<Vec<DocumentSnapshot>>(),
            has_more: false,
            total_items,
        }
    }

    fn window_with_sentinel(ids: &[&str], total_items: u64) -> Window {
        Window {
            has_more: true,
            ..window(ids, total_items)
        }
    }

    #[test]
    fn forward_offsets_advance_by_items_returned() {
        assert_eq!(derive_offsets(&request(Direction::Forward, 10, 20), 7), (27, 20));
        assert_eq!(derive_offsets(&request(Direction::Forward, 10, 0), 0), (0, 0));
    }

    #[test]
    fn backward_offsets_step_back_one_page_clamped_at_zero() {
        assert_eq!(derive_offsets(&request(Direction::Backward, 10, 30), 10), (20, 20));
        assert_eq!(derive_offsets(&request(Direction::Backward, 10, 10), 10), (0, 0));
        assert_eq!(derive_offsets(&request(Direction::Backward, 10, 4), 4), (0, 0));
    }

    #[test]
    fn cursors_point_at_first_and_last_items() {
        let result = assemble_result(&request(Direction::Forward, 3, 0), window(&["a", "b", "c"], 9));
        assert_eq!(result.page_meta.cursors.start, Some(cursor("a")));
        assert_eq!(result.page_meta.cursors.end, Some(cursor("c")));
        assert_eq!(result.items[0].id, "a");
        assert_eq!(result.items[0].fields["title"], pager_core::Value::from("title a"));
    }

    #[test]
    fn empty_window_has_no_cursors() {
        let result = assemble_result(&request(Direction::Forward, 3, 0), window(&[], 0));
        assert_eq!(result.page_meta.count, 0);
        assert_eq!(result.page_meta.cursors, PageCursors::default());
        assert!(!result.page_meta.has_next);
        assert!(!result.page_meta.has_prev);
        assert_eq!(result.total_items, 0);
    }

    #[test]
    fn zero_estimate_falls_back_to_lower_bound() {
        let result = assemble_result(&request(Direction::Forward, 3, 6), window(&["g", "h"], 0));
        assert_eq!(result.total_items, 8);
        assert!(!result.page_meta.has_next);
        assert!(result.page_meta.has_prev);
    }

    #[test]
    fn trimmed_sentinel_keeps_next_page_reachable_without_estimate() {
        let result = assemble_result(
            &request(Direction::Forward, 3, 0),
            window_with_sentinel(&["a", "b", "c"], 0),
        );
        assert_eq!(result.total_items, 4);
        assert!(result.page_meta.has_next);
    }

    #[test]
    fn stale_estimate_is_raised_to_proven_lower_bound() {
        let result = assemble_result(
            &request(Direction::Forward, 3, 3),
            window_with_sentinel(&["d", "e", "f"], 5),
        );
        assert_eq!(result.total_items, 7);
        assert!(result.page_meta.has_next);

        let result = assemble_result(&request(Direction::Forward, 3, 6), window(&["g", "h"], 5));
        assert_eq!(result.total_items, 8);
        assert!(!result.page_meta.has_next);
    }

    #[test]
    fn flags_follow_offsets_and_total() {
        let result = assemble_result(&request(Direction::Forward, 3, 3), window(&["d", "e", "f"], 10));
        assert_eq!(result.offset, 6);
        assert_eq!(result.current_offset, 3);
        assert!(result.page_meta.has_prev);
        assert!(result.page_meta.has_next);

        let result = assemble_result(&request(Direction::Backward, 3, 3), window(&["a", "b", "c"], 10));
        assert_eq!(result.offset, 0);
        assert_eq!(result.current_offset, 0);
        assert!(!result.page_meta.has_prev);
        assert!(result.page_meta.has_next);
    }
}
