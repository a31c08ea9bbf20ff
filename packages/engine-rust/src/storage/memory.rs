//! In-memory [`DocumentStore`] implementation backed by [`DashMap`].
//!
//! Implements the full constraint vocabulary with real keyset semantics:
//! equality predicates, multi-field ordering with a document-id tiebreak,
//! strict after/before anchors, and head/tail limits. Suitable for tests,
//! demos, and embedders whose collections fit in memory.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use pager_core::{
    AggregateSnapshot, Constraint, Cursor, Document, DocumentSnapshot, DocumentStore, Fields,
    Query, QuerySnapshot, SortDirection, Value,
};
use serde::{Deserialize, Serialize};

use crate::pagination::COUNT_KEY;

/// Position of a document in one sort order.
///
/// This is what a [`Cursor`] issued by [`MemoryStore`] encodes: the values
/// of the ordering fields plus the id tiebreak, as `MsgPack`. Anchoring on
/// a position works even after the document itself has been removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Position {
    values: Vec<Value>,
    id: String,
}

impl Position {
    fn of(id: &str, data: &Fields, orderings: &[(String, SortDirection)]) -> Self {
        Self {
            values: orderings
                .iter()
                .map(|(field, _)| data.get(field).cloned().unwrap_or(Value::Null))
                .collect(),
            id: id.to_string(),
        }
    }

    fn encode(&self) -> anyhow::Result<Cursor> {
        Ok(Cursor::from_bytes(rmp_serde::to_vec_named(self)?))
    }

    fn decode(cursor: &Cursor, orderings: &[(String, SortDirection)]) -> anyhow::Result<Self> {
        let position: Position = rmp_serde::from_slice(cursor.as_bytes())
            .map_err(|e| anyhow::anyhow!("cursor was not issued by this store: {e}"))?;
        anyhow::ensure!(
            position.values.len() == orderings.len(),
            "cursor was issued for a different ordering"
        );
        Ok(position)
    }
}

/// Compares two positions under `orderings`. Ties fall back to the document
/// id, in the direction of the last ordering.
fn compare_positions(
    a: &Position,
    b: &Position,
    orderings: &[(String, SortDirection)],
) -> Ordering {
    for ((x, y), (_, direction)) in a.values.iter().zip(&b.values).zip(orderings) {
        let ord = direction.apply(x.total_cmp(y));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    let tiebreak = orderings
        .last()
        .map_or(SortDirection::Asc, |(_, direction)| *direction);
    tiebreak.apply(a.id.cmp(&b.id))
}

/// In-memory document store keyed by collection name.
///
/// Each collection is a `BTreeMap` from document id to fields, so reads are
/// deterministic. Queries clone the collection under the shard lock and do
/// all filtering and sorting after releasing it.
pub struct MemoryStore {
    collections: DashMap<String, BTreeMap<String, Fields>>,
    aggregate: bool,
}

impl MemoryStore {
    /// Creates an empty store with aggregate counting enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
            aggregate: true,
        }
    }

    /// Creates an empty store whose `aggregate_count` reports the capability
    /// as unavailable, forcing callers onto their scan fallback.
    #[must_use]
    pub fn without_aggregate() -> Self {
        Self {
            aggregate: false,
            ..Self::new()
        }
    }

    /// Inserts or replaces a document. Returns the replaced document, if any.
    pub fn insert(&self, collection: &str, document: Document) -> Option<Document> {
        let Document { id, data } = document;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data)
            .map(|data| Document { id, data })
    }

    /// Inserts a document under a freshly generated id and returns the id.
    pub fn insert_fields(&self, collection: &str, data: Fields) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert(collection, Document { id: id.clone(), data });
        id
    }

    /// Removes a document, returning it if it existed.
    pub fn remove(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .get_mut(collection)?
            .remove(id)
            .map(|data| Document {
                id: id.to_string(),
                data,
            })
    }

    /// Reads a document by id.
    #[must_use]
    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .get(collection)?
            .get(id)
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            })
    }

    /// Number of documents in `collection`.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |docs| docs.len())
    }

    /// Whether `collection` holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Evaluates `query` against the current contents.
    fn run(&self, query: &Query) -> anyhow::Result<Vec<DocumentSnapshot>> {
        let documents: Vec<(String, Fields)> = self
            .collections
            .get(query.collection.name())
            .map(|docs| docs.iter().map(|(id, d)| (id.clone(), d.clone())).collect())
            .unwrap_or_default();

        let orderings: Vec<(String, SortDirection)> = query
            .orderings()
            .map(|(field, direction)| (field.to_string(), direction))
            .collect();

        let mut matched: Vec<(Position, String, Fields)> = documents
            .into_iter()
            .filter(|(_, data)| {
                query
                    .predicates()
                    .all(|(field, value)| data.get(field) == Some(value))
            })
            .map(|(id, data)| (Position::of(&id, &data, &orderings), id, data))
            .collect();

        matched.sort_by(|a, b| compare_positions(&a.0, &b.0, &orderings));

        for constraint in &query.constraints {
            match constraint {
                Constraint::AnchorAfter(cursor) => {
                    let anchor = Position::decode(cursor, &orderings)?;
                    matched.retain(|(p, _, _)| {
                        compare_positions(p, &anchor, &orderings) == Ordering::Greater
                    });
                }
                Constraint::AnchorBefore(cursor) => {
                    let anchor = Position::decode(cursor, &orderings)?;
                    matched.retain(|(p, _, _)| {
                        compare_positions(p, &anchor, &orderings) == Ordering::Less
                    });
                }
                Constraint::Equal { .. }
                | Constraint::OrderBy { .. }
                | Constraint::LimitFromHead(_)
                | Constraint::LimitFromTail(_) => {}
            }
        }

        for constraint in &query.constraints {
            match constraint {
                Constraint::LimitFromHead(n) => matched.truncate(*n),
                Constraint::LimitFromTail(n) => {
                    let surplus = matched.len().saturating_sub(*n);
                    matched.drain(..surplus);
                }
                _ => {}
            }
        }

        matched
            .into_iter()
            .map(|(position, id, data)| {
                Ok(DocumentSnapshot {
                    id,
                    data,
                    cursor: position.encode()?,
                })
            })
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn execute(&self, query: &Query) -> anyhow::Result<QuerySnapshot> {
        Ok(QuerySnapshot::new(self.run(query)?))
    }

    async fn aggregate_count(&self, query: &Query) -> anyhow::Result<AggregateSnapshot> {
        anyhow::ensure!(self.aggregate, "aggregate count is disabled on this store");
        let count = i64::try_from(self.run(query)?.len())?;
        let mut data = Fields::new();
        data.insert(COUNT_KEY.to_string(), Value::Int(count));
        Ok(AggregateSnapshot { data })
    }
}
