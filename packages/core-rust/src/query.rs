//! Store query vocabulary: collection references, constraints, queries.
//!
//! These are plain values describing what a [`DocumentStore`](crate::DocumentStore)
//! must do; building them performs no I/O. Constraint order is significant
//! and is preserved exactly as built.

use crate::cursor::Cursor;
use crate::types::{SortDirection, Value};

/// Handle to a named collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionRef {
    name: String,
}

impl CollectionRef {
    /// References the collection with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A single query constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `field == value`.
    Equal { field: String, value: Value },
    /// Sort by `field` in `direction`. Ties are broken by document id.
    OrderBy {
        field: String,
        direction: SortDirection,
    },
    /// Start strictly after the cursor's position.
    AnchorAfter(Cursor),
    /// End strictly before the cursor's position.
    AnchorBefore(Cursor),
    /// Keep the first `n` records of the ordered result.
    LimitFromHead(usize),
    /// Keep the last `n` records of the ordered result, still in sort order.
    LimitFromTail(usize),
}

impl Constraint {
    /// `equalityFilter(field, value)`.
    #[must_use]
    pub fn equal(field: impl Into<String>, value: Value) -> Self {
        Constraint::Equal {
            field: field.into(),
            value,
        }
    }

    /// `orderBy(field, direction)`.
    #[must_use]
    pub fn order_by(field: impl Into<String>, direction: SortDirection) -> Self {
        Constraint::OrderBy {
            field: field.into(),
            direction,
        }
    }

    /// Whether this constraint narrows which documents match, as opposed
    /// to ordering or windowing them.
    #[must_use]
    pub fn is_predicate(&self) -> bool {
        matches!(self, Constraint::Equal { .. })
    }
}

/// A collection plus an ordered list of constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Target collection.
    pub collection: CollectionRef,
    /// Constraints in application order.
    pub constraints: Vec<Constraint>,
}

impl Query {
    /// `buildQuery(collection, ...constraints)`.
    #[must_use]
    pub fn new(collection: CollectionRef, constraints: Vec<Constraint>) -> Self {
        Self {
            collection,
            constraints,
        }
    }

    /// Equality predicates of this query, in order.
    pub fn predicates(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Equal { field, value } => Some((field.as_str(), value)),
            _ => None,
        })
    }

    /// Ordering constraints of this query, in order.
    pub fn orderings(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::OrderBy { field, direction } => Some((field.as_str(), *direction)),
            _ => None,
        })
    }
}
