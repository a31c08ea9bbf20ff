//! Page request and page result schemas.
//!
//! [`RawPageRequest`] is the loosely typed inbound form: every field is
//! optional and may hold any JSON value, because malformed paging state must
//! never fail a list view. The engine normalizes it into a [`PageRequest`].
//! [`PageResult`] is what the engine hands back. All structs use
//! `#[serde(rename_all = "camelCase")]` for the wire form.

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::document::Item;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Navigation direction relative to the caller's current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the tail of the sort order.
    #[default]
    Forward,
    /// Towards the head of the sort order.
    Backward,
}

impl Direction {
    /// Wire name of the direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Inbound page request exactly as the caller sent it.
///
/// Numbers may arrive as JSON numbers or numeric strings (query strings carry
/// everything as text); the cursor arrives as its wire token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPageRequest {
    /// `"forward"` or `"backward"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<serde_json::Value>,
    /// Requested page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<serde_json::Value>,
    /// Cursor token from a previous result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<serde_json::Value>,
    /// Synthetic offset of the caller's current page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_offset: Option<serde_json::Value>,
}

/// Canonical page request produced by normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Navigation direction.
    pub direction: Direction,
    /// Effective page size, already clamped.
    pub page_size: u32,
    /// Store cursor to anchor on, if any.
    pub cursor: Option<Cursor>,
    /// Synthetic offset the request navigates from.
    pub current_offset: u64,
}

impl PageRequest {
    /// Converts back into the wire form, e.g. to hand to a client.
    #[must_use]
    pub fn into_raw(self) -> RawPageRequest {
        RawPageRequest {
            direction: Some(self.direction.as_str().into()),
            page_size: Some(self.page_size.into()),
            cursor: self.cursor.map(|c| c.to_token().into()),
            current_offset: Some(self.current_offset.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Boundary cursors of a returned page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursors {
    /// Position of the first item, `None` on an empty page.
    pub start: Option<Cursor>,
    /// Position of the last item, `None` on an empty page.
    pub end: Option<Cursor>,
}

/// Pager metadata for a returned page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Effective page size of the request.
    pub page_size: u32,
    /// Number of items on this page.
    pub count: usize,
    /// Whether a page exists after this one.
    pub has_next: bool,
    /// Whether a page exists before this one.
    pub has_prev: bool,
    /// Boundary cursors for the next/previous requests.
    pub cursors: PageCursors,
}

/// One page of a list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// The page items, in sort order.
    pub items: Vec<Item>,
    /// Pager metadata.
    pub page_meta: PageMeta,
    /// Synthetic offset to navigate forward from.
    pub offset: u64,
    /// Synthetic offset of the first item on this page.
    pub current_offset: u64,
    /// Approximate number of matching items. May lag the page itself.
    pub total_items: u64,
}

impl PageResult {
    /// Request for the page after this one, or `None` on the last page.
    ///
    /// The next page starts right after this page's last item, which is
    /// `current_offset + count` whichever direction this page was fetched in.
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        self.page_meta.has_next.then(|| PageRequest {
            direction: Direction::Forward,
            page_size: self.page_meta.page_size,
            cursor: self.page_meta.cursors.end.clone(),
            current_offset: self
                .current_offset
                .saturating_add(self.page_meta.count as u64),
        })
    }

    /// Request for the page before this one, or `None` on the first page.
    #[must_use]
    pub fn prev_request(&self) -> Option<PageRequest> {
        self.page_meta.has_prev.then(|| PageRequest {
            direction: Direction::Backward,
            page_size: self.page_meta.page_size,
            cursor: self.page_meta.cursors.start.clone(),
            current_offset: self.current_offset,
        })
    }
}
