use std::future::Future;
use std::sync::Arc;

use confdb_namespace::{InMemoryNamespace, NamespaceStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// confdb HTTP server.
pub struct ConfdbServer {
    config: ServerConfig,
    store: Arc<dyn NamespaceStore>,
}

impl ConfdbServer {
    /// Server over a fresh, empty in-memory namespace.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryNamespace::new()))
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn NamespaceStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn NamespaceStore> {
        Arc::clone(&self.store)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        build_router(self.store(), &self.config)
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Bind the configured address and serve until `signal` resolves.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener, signal).await
    }

    /// Serve on an already-bound listener until `signal` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;
        tracing::info!("confdb server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("confdb server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(e) => tracing::warn!("failed to listen for Ctrl-C: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn server_construction() {
        let server = ConfdbServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr.port(), 8080);
        assert!(server.store().list("/").unwrap().is_empty());
    }

    #[test]
    fn router_builds() {
        let server = ConfdbServer::new(ServerConfig::default());
        assert!(server.router().is_ok());
    }

    #[test]
    fn router_rejects_invalid_config() {
        let config = ServerConfig { log_level: "chatty".into(), ..Default::default() };
        assert!(ConfdbServer::new(config).router().is_err());
    }

    #[tokio::test]
    async fn serves_over_tcp_and_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = ConfdbServer::new(ServerConfig::default());
        let store = server.store();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_on(listener, async {
            let _ = rx.await;
        }));

        let put = raw_request(
            addr,
            "PUT /app/name HTTP/1.1\r\nHost: test\r\nContent-Length: 6\r\nConnection: close\r\n\r\nconfdb",
        )
        .await;
        assert!(put.starts_with("HTTP/1.1 204"), "{put}");
        assert_eq!(store.get("/app/name").unwrap(), "confdb");

        let get = raw_request(
            addr,
            "GET /app/ HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(get.starts_with("HTTP/1.1 200"), "{get}");
        assert!(get.ends_with("/app/name\n"), "{get}");

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
