use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use confdb_namespace::NamespaceStore;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::{self, AppState};

/// Build the axum router serving `store`.
///
/// There are no fixed routes: every path belongs to the namespace, so the
/// whole surface is a single fallback handler.
pub fn build_router(store: Arc<dyn NamespaceStore>, config: &ServerConfig) -> ServerResult<Router> {
    config.validate()?;
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(config.trace_level()?)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    Ok(Router::new()
        .fallback(handler::dispatch)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(AppState::new(store))
        .layer(GlobalConcurrencyLimitLayer::new(config.max_connections))
        .layer(trace_layer))
}
