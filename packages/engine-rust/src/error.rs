/// Errors returned by [`ListView::fetch_page`](crate::ListView::fetch_page).
///
/// Only the page query itself can fail a call. Count failures are absorbed
/// by the estimator and malformed requests are normalized away.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("page query on collection {collection} failed")]
    Fetch {
        collection: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PageError {
    /// Collection the failing call targeted.
    #[must_use]
    pub fn collection(&self) -> &str {
        match self {
            PageError::Fetch { collection, .. } => collection,
        }
    }
}
