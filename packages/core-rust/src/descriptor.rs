//! Collection descriptors: the per-list parameters of the paging engine.
//!
//! A [`CollectionDescriptor`] names the collection, the fixed predicates every
//! query on the list carries, the fixed sort key, and the caller filter keys
//! the list honours. The sort key is deliberately not caller-configurable so
//! cursors stay meaningful across calls.

use std::sync::LazyLock;

use anyhow::ensure;
use regex::Regex;

use crate::types::{SortDirection, Value};

/// Collection holding marketplace items.
pub const ITEMS_COLLECTION: &str = "items";
/// Field carrying the item lifecycle status.
pub const STATUS_FIELD: &str = "status";
/// Optional scoping filter restricting a list to one seller.
pub const SELLER_FILTER: &str = "sellerId";
/// Creation timestamp field (millis since epoch).
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Completion timestamp field for sold items (millis since epoch).
pub const SOLD_AT_FIELD: &str = "soldAt";

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*(\.[A-Za-z_][A-Za-z0-9_\-]*)*$")
        .expect("identifier pattern compiles")
});

/// Parameters of one paged list view over a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDescriptor {
    name: String,
    base_filters: Vec<(String, Value)>,
    sort_field: String,
    sort_direction: SortDirection,
    filter_keys: Vec<String>,
}

impl CollectionDescriptor {
    /// Creates a descriptor sorted by `sort_field` with no base filters and
    /// no recognized caller filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection or sort field name is not a
    /// dotted identifier.
    pub fn new(
        name: impl Into<String>,
        sort_field: impl Into<String>,
        sort_direction: SortDirection,
    ) -> anyhow::Result<Self> {
        let name = name.into();
        let sort_field = sort_field.into();
        ensure!(IDENTIFIER.is_match(&name), "invalid collection name: {name:?}");
        ensure!(
            IDENTIFIER.is_match(&sort_field),
            "invalid sort field: {sort_field:?}"
        );
        Ok(Self {
            name,
            base_filters: Vec::new(),
            sort_field,
            sort_direction,
            filter_keys: Vec::new(),
        })
    }

    /// Adds a fixed equality predicate applied to every query of this list.
    ///
    /// # Errors
    ///
    /// Returns an error if `field` is not a dotted identifier.
    pub fn with_base_filter(
        mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> anyhow::Result<Self> {
        let field = field.into();
        ensure!(IDENTIFIER.is_match(&field), "invalid filter field: {field:?}");
        self.base_filters.push((field, value.into()));
        Ok(self)
    }

    /// Declares a caller filter key this list honours. The key doubles as
    /// the document field it constrains.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a dotted identifier.
    pub fn with_filter_key(mut self, key: impl Into<String>) -> anyhow::Result<Self> {
        let key = key.into();
        ensure!(IDENTIFIER.is_match(&key), "invalid filter key: {key:?}");
        if !self.filter_keys.contains(&key) {
            self.filter_keys.push(key);
        }
        Ok(self)
    }

    /// "Available items": `status == available`, optional seller scope,
    /// newest first.
    #[must_use]
    pub fn available_items() -> Self {
        Self::items_with_status("available", CREATED_AT_FIELD)
    }

    /// "Sold items": `status == sold`, optional seller scope, most recently
    /// sold first.
    #[must_use]
    pub fn sold_items() -> Self {
        Self::items_with_status("sold", SOLD_AT_FIELD)
    }

    fn items_with_status(status: &str, sort_field: &str) -> Self {
        Self {
            name: ITEMS_COLLECTION.to_string(),
            base_filters: vec![(STATUS_FIELD.to_string(), Value::from(status))],
            sort_field: sort_field.to_string(),
            sort_direction: SortDirection::Desc,
            filter_keys: vec![SELLER_FILTER.to_string()],
        }
    }

    /// Collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed predicates, in application order.
    #[must_use]
    pub fn base_filters(&self) -> &[(String, Value)] {
        &self.base_filters
    }

    /// Sort field.
    #[must_use]
    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    /// Sort direction.
    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Caller filter keys this list honours.
    #[must_use]
    pub fn filter_keys(&self) -> &[String] {
        &self.filter_keys
    }

    /// Whether `key` is a caller filter this list honours.
    #[must_use]
    pub fn recognizes(&self, key: &str) -> bool {
        self.filter_keys.iter().any(|k| k == key)
    }
}
