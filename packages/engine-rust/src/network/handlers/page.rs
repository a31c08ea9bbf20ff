//! `GET /lists/{view}/page`: one page of a named list view.
//!
//! Query parameters map onto [`FetchPage`]: `direction`, `pageSize`,
//! `cursor`, and `currentOffset` form the request, `offset` is the offset
//! fallback, and every other parameter is a caller filter. Values arrive as
//! strings and are normalized by the engine like any other raw input.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pager_core::{Filters, PageResult, RawPageRequest};
use serde_json::{json, Value as JsonValue};
use tracing::warn;

use super::AppState;
use crate::error::PageError;
use crate::pagination::FetchPage;

/// Failures of the page route, each mapped to a status and a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ListRouteError {
    #[error("unknown list view {0}")]
    UnknownView(String),
    #[error(transparent)]
    Page(#[from] PageError),
}

impl IntoResponse for ListRouteError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ListRouteError::UnknownView(_) => (StatusCode::NOT_FOUND, "unknown list view"),
            ListRouteError::Page(err) => {
                warn!(error = ?err, collection = err.collection(), "list route failed");
                (StatusCode::BAD_GATEWAY, "could not load page")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Serves one page of the view named in the path.
///
/// # Errors
///
/// 404 for a view name with no registered [`ListView`](crate::ListView),
/// 502 when the store fails the page query.
pub async fn page_handler(
    State(state): State<AppState>,
    Path(view): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<PageResult>, ListRouteError> {
    let list = state
        .views
        .get(&view)
        .ok_or(ListRouteError::UnknownView(view))?;
    let page = list.fetch_page(fetch_params(params)).await?;
    Ok(Json(page))
}

/// Splits flat query parameters into request fields, offset, and filters.
fn fetch_params(params: BTreeMap<String, String>) -> FetchPage {
    let mut request = RawPageRequest::default();
    let mut offset = None;
    let mut filters = Filters::new();

    for (key, value) in params {
        match key.as_str() {
            "direction" => request.direction = Some(JsonValue::String(value)),
            "pageSize" => request.page_size = Some(JsonValue::String(value)),
            "cursor" => request.cursor = Some(JsonValue::String(value)),
            "currentOffset" => request.current_offset = Some(JsonValue::String(value)),
            "offset" => offset = Some(JsonValue::String(value)),
            _ => filters.insert(key, value),
        }
    }

    FetchPage {
        request,
        filters,
        offset,
    }
}
