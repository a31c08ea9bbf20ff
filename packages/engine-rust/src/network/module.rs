//! Network module with deferred startup lifecycle.
//!
//! `new()` registers the list views, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves.

use std::collections::BTreeMap;
use std::future::Future;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::config::NetworkConfig;
use super::handlers::{health_handler, liveness_handler, page_handler, AppState};
use super::middleware::{with_list_layers, with_transport_layers};
use crate::pagination::{ListView, PagerDeps};

/// Route name of the available-items list.
pub const AVAILABLE_VIEW: &str = "available";
/// Route name of the sold-items list.
pub const SOLD_VIEW: &str = "sold";

/// Manages the HTTP server lifecycle for a set of named list views.
pub struct NetworkModule {
    config: NetworkConfig,
    views: BTreeMap<String, ListView>,
    listener: Option<TcpListener>,
}

impl NetworkModule {
    /// Creates a module serving `views` without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, views: BTreeMap<String, ListView>) -> Self {
        Self {
            config,
            views,
            listener: None,
        }
    }

    /// Creates a module serving the "available" and "sold" item lists over
    /// one store.
    #[must_use]
    pub fn with_item_views(config: NetworkConfig, deps: &PagerDeps) -> Self {
        let mut views = BTreeMap::new();
        views.insert(
            AVAILABLE_VIEW.to_string(),
            ListView::available_items(deps.clone()),
        );
        views.insert(SOLD_VIEW.to_string(), ListView::sold_items(deps.clone()));
        Self::new(config, views)
    }

    /// Names of the served views, in route order.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /lists/{view}/page` -- one page of a list view, with CORS and
    ///   the page deadline
    /// - `GET /health` -- served views and uptime
    /// - `GET /health/live` -- liveness probe
    pub fn build_router(&self) -> Router {
        let state = AppState::new(self.views.clone());

        let lists = with_list_layers(
            Router::new().route("/lists/{view}/page", get(page_handler)),
            &self.config,
        );
        let router = lists
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler));

        with_transport_layers(router).with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which differs from the configured
    /// port when port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let port = listener.local_addr()?.port();

        info!(host = %self.config.host, port, "TCP listener bound");

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves, then lets in-flight
    /// requests finish.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let Some(listener) = self.listener.take() else {
            anyhow::bail!("start() must be called before serve()");
        };
        let router = self.build_router();

        info!(views = ?self.views.keys().collect::<Vec<_>>(), "serving list routes");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("list routes stopped");
        Ok(())
    }
}
