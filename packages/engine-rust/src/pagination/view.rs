//! List views: one generic paging engine per collection descriptor.

use std::sync::Arc;
use std::time::Instant;

use pager_core::{
    CollectionDescriptor, DocumentStore, Filters, PageRequest, PageResult, RawPageRequest,
};
use tracing::{info_span, Instrument};

use super::assemble::assemble_result;
use super::normalize::normalize_request;
use super::window::execute_window;
use crate::config::PagerConfig;
use crate::error::PageError;

/// Dependencies injected into every list view.
///
/// Cloning is cheap: the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct PagerDeps {
    /// Document store client.
    pub store: Arc<dyn DocumentStore>,
    /// Page-size bounds.
    pub config: PagerConfig,
}

impl PagerDeps {
    /// Dependencies with the default page-size bounds.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            config: PagerConfig::default(),
        }
    }

    /// Replaces the page-size bounds.
    #[must_use]
    pub fn with_config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Arguments of one [`ListView::fetch_page`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchPage {
    /// The page request as the caller sent it.
    pub request: RawPageRequest,
    /// Caller filters.
    pub filters: Filters,
    /// Fallback for `request.current_offset`.
    pub offset: Option<serde_json::Value>,
}

impl FetchPage {
    /// Call arguments for an already-canonical request, e.g. one produced by
    /// [`PageResult::next_request`].
    #[must_use]
    pub fn from_request(request: PageRequest) -> Self {
        Self {
            request: request.into_raw(),
            ..Self::default()
        }
    }

    /// Replaces the caller filters.
    #[must_use]
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}

/// Paged, filtered, ordered view over one collection.
///
/// Holds no state between calls: every [`fetch_page`](Self::fetch_page) is
/// derived from its arguments and the store's contents at call time, so a
/// single view can serve concurrent callers.
#[derive(Clone)]
pub struct ListView {
    descriptor: CollectionDescriptor,
    deps: PagerDeps,
}

impl ListView {
    /// Creates a view over `descriptor`.
    #[must_use]
    pub fn new(descriptor: CollectionDescriptor, deps: PagerDeps) -> Self {
        Self { descriptor, deps }
    }

    /// The "available items" list.
    #[must_use]
    pub fn available_items(deps: PagerDeps) -> Self {
        Self::new(CollectionDescriptor::available_items(), deps)
    }

    /// The "sold items" list.
    #[must_use]
    pub fn sold_items(deps: PagerDeps) -> Self {
        Self::new(CollectionDescriptor::sold_items(), deps)
    }

    /// The descriptor this view pages over.
    #[must_use]
    pub fn descriptor(&self) -> &CollectionDescriptor {
        &self.descriptor
    }

    /// Fetches one page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Fetch`] when the page query fails. There are no
    /// retries; count failures and malformed requests never error.
    pub async fn fetch_page(&self, params: FetchPage) -> Result<PageResult, PageError> {
        let request = normalize_request(&params.request, params.offset.as_ref(), &self.deps.config);
        let collection = self.descriptor.name();

        let span = info_span!(
            "fetch_page",
            collection = collection,
            direction = request.direction.as_str(),
            page_size = request.page_size,
            current_offset = request.current_offset,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        async move {
            let start = Instant::now();
            let result = execute_window(
                self.deps.store.as_ref(),
                &self.descriptor,
                &params.filters,
                &request,
            )
            .await
            .map(|window| assemble_result(&request, window));

            let elapsed = start.elapsed();
            let outcome = match &result {
                Ok(_) => "ok",
                Err(_) => "error",
            };

            #[allow(clippy::cast_possible_truncation)]
            let duration_ms = elapsed.as_millis() as u64;
            tracing::Span::current().record("duration_ms", duration_ms);
            tracing::Span::current().record("outcome", outcome);
            metrics::histogram!("pager_fetch_page_duration_ms", "collection" => collection.to_owned())
                .record(elapsed.as_secs_f64() * 1000.0);

            match &result {
                Ok(page) => tracing::debug!(
                    count = page.page_meta.count,
                    offset = page.offset,
                    total_items = page.total_items,
                    "page assembled"
                ),
                Err(err) => {
                    metrics::counter!(
                        "pager_page_fetch_failed_total",
                        "collection" => collection.to_owned()
                    )
                    .increment(1);
                    tracing::warn!(error = ?err, "page fetch failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}
