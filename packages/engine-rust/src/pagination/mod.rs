//! Cursor-based bidirectional pagination over a document store.
//!
//! A call flows through five stages:
//!
//! 1. [`normalize`]: raw request to canonical [`PageRequest`](pager_core::PageRequest)
//! 2. [`constraints`]: filters, sort key, cursor and window size to store constraints
//! 3. [`count`]: approximate total, aggregate first, full scan as fallback
//! 4. [`window`]: page fetch and count in parallel, sentinel trimming
//! 5. [`assemble`]: items, cursors, synthetic offsets, pager flags
//!
//! [`ListView`] ties the stages together for one collection descriptor.

pub mod assemble;
pub mod constraints;
pub mod count;
pub mod normalize;
pub mod view;
pub mod window;

#[cfg(test)]
pub(crate) mod test_support;

pub use assemble::{assemble_result, derive_offsets};
pub use constraints::{count_query, filter_predicates, page_query, window_constraints};
pub use count::{count_matching, COUNT_KEY};
pub use normalize::normalize_request;
pub use view::{FetchPage, ListView, PagerDeps};
pub use window::{execute_window, trim_sentinel, Window};
