//! Stored documents, query snapshots, and the flat list items built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::types::Value;

/// Field data of a stored document.
pub type Fields = BTreeMap<String, Value>;

/// A stored document: store-assigned identifier plus field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier, unique within the collection.
    pub id: String,
    /// Field data.
    pub data: Fields,
}

impl Document {
    /// Creates a document from an id and field pairs.
    #[must_use]
    pub fn new<I, K>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            id: id.into(),
            data: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Reads a single field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// A document as returned by a query, carrying its position in the query's
/// sort order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    /// Store-assigned identifier.
    pub id: String,
    /// Field data at read time.
    pub data: Fields,
    /// Store-native position marker for this document in the query order.
    pub cursor: Cursor,
}

/// A plain list item: the document identifier merged with its fields.
///
/// Serializes flat, e.g. `{"id": "a1", "title": "Lamp", "status": "available"}`.
/// A field literally named `id` is shadowed by the document identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: String,
    /// Field data.
    #[serde(flatten)]
    pub fields: Fields,
}

impl From<DocumentSnapshot> for Item {
    fn from(snapshot: DocumentSnapshot) -> Self {
        let mut fields = snapshot.data;
        fields.remove("id");
        Self {
            id: snapshot.id,
            fields,
        }
    }
}
