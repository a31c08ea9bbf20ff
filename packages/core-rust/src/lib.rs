//! Pager core: value model, opaque cursors, store query constraints,
//! collection descriptors, page schemas, and the document store client trait.

pub mod cursor;
pub mod descriptor;
pub mod document;
pub mod filters;
pub mod page;
pub mod query;
pub mod traits;
pub mod types;

pub use cursor::Cursor;
pub use descriptor::CollectionDescriptor;
pub use document::{Document, DocumentSnapshot, Fields, Item};
pub use filters::Filters;
pub use page::{Direction, PageCursors, PageMeta, PageRequest, PageResult, RawPageRequest};
pub use query::{CollectionRef, Constraint, Query};
pub use traits::{AggregateSnapshot, DocumentStore, QuerySnapshot};
pub use types::{SortDirection, Value};
