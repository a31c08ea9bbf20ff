//! HTTP handler definitions for the list surface.
//!
//! Defines `AppState` (the shared state carried through axum extractors)
//! and re-exports the handler functions used when building the router.

pub mod health;
pub mod page;

pub use health::{health_handler, liveness_handler};
pub use page::{page_handler, ListRouteError};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::pagination::ListView;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// List views by route name, e.g. `available` or `sold`.
    pub views: Arc<BTreeMap<String, ListView>>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Wraps a set of named views.
    #[must_use]
    pub fn new(views: BTreeMap<String, ListView>) -> Self {
        Self {
            views: Arc::new(views),
            start_time: Instant::now(),
        }
    }
}
