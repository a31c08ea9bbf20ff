//! Document store implementations shipped with the engine.
//!
//! Production deployments plug their own [`pager_core::DocumentStore`]
//! client into [`crate::pagination::PagerDeps`]; [`MemoryStore`] covers
//! tests, demos, and small embedded datasets.

pub mod memory;

pub use memory::MemoryStore;
