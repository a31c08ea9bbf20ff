//! "Latest call wins" sequencing for callers of the paging engine.
//!
//! The engine itself performs no de-duplication or sequencing: rapid
//! forward/backward navigation can resolve out of order. A caller that only
//! wants to render the most recent request takes a [`CallTicket`] before each
//! call and lets the guard discard results that were overtaken.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one call in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CallTicket(u64);

impl CallTicket {
    /// Sequence number of the call, starting at 1.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Monotonic call-id guard. Lock-free and shareable behind an `Arc`.
#[derive(Debug, Default)]
pub struct LatestCallGuard {
    latest: AtomicU64,
}

impl LatestCallGuard {
    /// Creates a guard with no calls issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new call. Every earlier ticket stops being the latest.
    #[must_use]
    pub fn begin(&self) -> CallTicket {
        CallTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether no call began after `ticket`.
    #[must_use]
    pub fn is_latest(&self, ticket: CallTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Passes `result` through only if `ticket` is still the latest call.
    pub fn accept<T>(&self, ticket: CallTicket, result: T) -> Option<T> {
        self.is_latest(ticket).then_some(result)
    }
}
