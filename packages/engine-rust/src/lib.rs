//! Pager engine: cursor-based bidirectional pagination over document stores.
//!
//! [`ListView`] pages one filtered, ordered collection. [`MemoryStore`] is a
//! ready-made store, and [`NetworkModule`] exposes list views over HTTP.

pub mod config;
pub mod error;
pub mod guard;
pub mod network;
pub mod pagination;
pub mod storage;

pub use config::PagerConfig;
pub use error::PageError;
pub use guard::{CallTicket, LatestCallGuard};
pub use network::{NetworkConfig, NetworkModule};
pub use pagination::{FetchPage, ListView, PagerDeps};
pub use storage::MemoryStore;
