//! Document store client seam.
//!
//! The engine reaches a store only through [`DocumentStore`]: one required
//! query executor and an optional native count aggregate.

use async_trait::async_trait;

use crate::document::{DocumentSnapshot, Fields};
use crate::query::Query;

/// Result of executing a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySnapshot {
    /// Matching documents, in query order.
    pub records: Vec<DocumentSnapshot>,
    /// Number of documents returned.
    pub size: usize,
}

impl QuerySnapshot {
    /// Builds a snapshot whose `size` matches its records.
    #[must_use]
    pub fn new(records: Vec<DocumentSnapshot>) -> Self {
        let size = records.len();
        Self { records, size }
    }
}

/// Payload of a store-native aggregate. A count aggregate reports its
/// result under the `count` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSnapshot {
    /// Aggregate results keyed by aggregate name.
    pub data: Fields,
}

/// Client for a remote document store.
///
/// Implementations own connection, authentication and wire protocol; the
/// paging engine only builds [`Query`] values and runs them through this
/// trait. Used as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs `query` and returns the matching documents.
    async fn execute(&self, query: &Query) -> anyhow::Result<QuerySnapshot>;

    /// Counts the documents matching `query` without transferring them.
    ///
    /// Optional capability: the default implementation reports it as
    /// unsupported. Callers must tolerate both errors and odd payloads.
    async fn aggregate_count(&self, _query: &Query) -> anyhow::Result<AggregateSnapshot> {
        anyhow::bail!("aggregate count is not supported by this store")
    }
}
