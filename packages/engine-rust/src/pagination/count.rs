//! Approximate total-count estimation.
//!
//! Prefers the store's native aggregate; any failure there (error, missing
//! capability, malformed payload) falls back to a full scan of the matching
//! documents. Counting never fails: a failed scan counts as zero.

use pager_core::{CollectionDescriptor, DocumentStore, Filters, Value};
use tracing::warn;

use super::constraints::count_query;

/// Key under which a count aggregate reports its result.
pub const COUNT_KEY: &str = "count";

/// Counts documents matching the list's predicates plus `filters`.
pub async fn count_matching(
    store: &dyn DocumentStore,
    descriptor: &CollectionDescriptor,
    filters: &Filters,
) -> u64 {
    let collection = descriptor.name();
    let query = count_query(descriptor, filters);

    match store.aggregate_count(&query).await {
        Ok(snapshot) => match snapshot.data.get(COUNT_KEY).and_then(Value::as_count) {
            Some(count) => return count,
            None => warn!(
                collection,
                payload = ?snapshot.data,
                "aggregate count payload is malformed, falling back to scan"
            ),
        },
        Err(err) => warn!(
            collection,
            error = %err,
            "aggregate count failed, falling back to scan"
        ),
    }

    metrics::counter!("pager_count_fallback_total", "collection" => collection.to_owned())
        .increment(1);

    match store.execute(&query).await {
        Ok(snapshot) => snapshot.size as u64,
        Err(err) => {
            metrics::counter!("pager_count_failed_total", "collection" => collection.to_owned())
                .increment(1);
            warn!(
                collection,
                error = %err,
                "count scan failed, reporting zero"
            );
            0
        }
    }
}
