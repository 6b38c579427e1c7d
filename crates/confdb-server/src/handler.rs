use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use confdb_namespace::NamespaceStore;

use crate::error::ServerResult;

/// Methods the namespace answers to, as advertised in `Allow`.
pub const ALLOWED_METHODS: &str = "GET, PUT, DELETE";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NamespaceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn NamespaceStore>) -> Self {
        Self { store }
    }
}

/// Entry point for every request: the URI path is the namespace path.
///
/// A `GET` whose path ends in `/` lists that directory; any other `GET`
/// reads an object.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> ServerResult<Response> {
    let path = uri.path();
    match method {
        Method::GET => match path.strip_suffix('/') {
            Some(dir) => list_handler(&state, dir),
            None => get_handler(&state, path),
        },
        Method::PUT => put_handler(&state, path, body),
        Method::DELETE => delete_handler(&state, path),
        _ => Ok(method_not_allowed(&method)),
    }
}

fn get_handler(state: &AppState, path: &str) -> ServerResult<Response> {
    let value = state.store.get(path)?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        value,
    )
        .into_response())
}

fn list_handler(state: &AppState, path: &str) -> ServerResult<Response> {
    let children = state.store.list(path)?;
    let mut body = String::new();
    for child in &children {
        body.push_str(child);
        body.push('\n');
    }
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

fn put_handler(state: &AppState, path: &str, body: Bytes) -> ServerResult<Response> {
    let size = body.len();
    state.store.put(path, body)?;
    tracing::debug!(path, size, "stored object");
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn delete_handler(state: &AppState, path: &str) -> ServerResult<Response> {
    state.store.delete(path)?;
    tracing::debug!(path, "deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn method_not_allowed(method: &Method) -> Response {
    tracing::debug!(%method, "unsupported method");
    let status = StatusCode::METHOD_NOT_ALLOWED;
    (
        status,
        [(header::ALLOW, ALLOWED_METHODS)],
        status.canonical_reason().unwrap_or_default(),
    )
        .into_response()
}
