//! Scripted [`DocumentStore`] for engine unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pager_core::{
    AggregateSnapshot, Cursor, DocumentSnapshot, DocumentStore, Fields, Query, QuerySnapshot, Value,
};

use super::count::COUNT_KEY;

/// What the page query returns.
pub(crate) enum PageScript {
    Records(Vec<DocumentSnapshot>),
    Fail,
}

/// What the aggregate count returns.
pub(crate) enum AggregateScript {
    Count(Value),
    Missing,
    Fail,
    Unsupported,
}

/// What the fallback scan returns.
pub(crate) enum ScanScript {
    Size(usize),
    Fail,
}

/// Store answering page queries, aggregates and scans from fixed scripts.
///
/// Page queries are told apart from scans by their `orderBy` constraint.
pub(crate) struct ScriptedStore {
    page: PageScript,
    aggregate: AggregateScript,
    scan: ScanScript,
    delay: Duration,
    page_queries: Mutex<Vec<Query>>,
    scans: Mutex<Vec<Query>>,
    aggregated: Mutex<Vec<Query>>,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self {
            page: PageScript::Records(Vec::new()),
            aggregate: AggregateScript::Unsupported,
            scan: ScanScript::Size(0),
            delay: Duration::ZERO,
            page_queries: Mutex::new(Vec::new()),
            scans: Mutex::new(Vec::new()),
            aggregated: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_page(mut self, page: PageScript) -> Self {
        self.page = page;
        self
    }

    pub(crate) fn with_records(self, ids: &[&str]) -> Self {
        self.with_page(PageScript::Records(ids.iter().map(|id| snapshot(id)).collect()))
    }

    pub(crate) fn with_aggregate(mut self, aggregate: AggregateScript) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub(crate) fn with_total(self, total: i64) -> Self {
        self.with_aggregate(AggregateScript::Count(Value::Int(total)))
    }

    pub(crate) fn with_scan(mut self, scan: ScanScript) -> Self {
        self.scan = scan;
        self
    }

    /// Every store call sleeps this long before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn page_queries(&self) -> Vec<Query> {
        self.page_queries.lock().unwrap().clone()
    }

    pub(crate) fn scans(&self) -> Vec<Query> {
        self.scans.lock().unwrap().clone()
    }

    pub(crate) fn aggregated(&self) -> Vec<Query> {
        self.aggregated.lock().unwrap().clone()
    }

    pub(crate) fn aggregate_calls(&self) -> usize {
        self.aggregated.lock().unwrap().len()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn execute(&self, query: &Query) -> anyhow::Result<QuerySnapshot> {
        self.pause().await;
        if query.orderings().next().is_some() {
            self.page_queries.lock().unwrap().push(query.clone());
            match &self.page {
                PageScript::Records(records) => Ok(QuerySnapshot::new(records.clone())),
                PageScript::Fail => anyhow::bail!("page query refused"),
            }
        } else {
            self.scans.lock().unwrap().push(query.clone());
            match self.scan {
                ScanScript::Size(n) => Ok(QuerySnapshot::new(
                    (0..n).map(|i| snapshot(&format!("scan-{i}"))).collect(),
                )),
                ScanScript::Fail => anyhow::bail!("scan refused"),
            }
        }
    }

    async fn aggregate_count(&self, query: &Query) -> anyhow::Result<AggregateSnapshot> {
        self.pause().await;
        self.aggregated.lock().unwrap().push(query.clone());
        match &self.aggregate {
            AggregateScript::Count(value) => {
                let mut data = Fields::new();
                data.insert(COUNT_KEY.to_string(), value.clone());
                Ok(AggregateSnapshot { data })
            }
            AggregateScript::Missing => Ok(AggregateSnapshot::default()),
            AggregateScript::Fail => anyhow::bail!("aggregate exploded"),
            AggregateScript::Unsupported => anyhow::bail!("aggregate count is not supported"),
        }
    }
}

/// Snapshot whose cursor is the id bytes, so tests can map cursors back to ids.
pub(crate) fn snapshot(id: &str) -> DocumentSnapshot {
    let mut data = Fields::new();
    data.insert("title".to_string(), Value::from(format!("title {id}")));
    DocumentSnapshot {
        id: id.to_string(),
        data,
        cursor: cursor(id),
    }
}

/// Cursor [`snapshot`] assigns to `id`.
pub(crate) fn cursor(id: &str) -> Cursor {
    Cursor::from_bytes(id.as_bytes().to_vec())
}
