//! Prometheus scrape endpoint.

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;

fn router() -> Router {
    Router::new().route("/metrics", get(|| async { crate::metrics::gather_metrics() }))
}

/// Bind the metrics listener on all interfaces.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await
}

/// Serve `/metrics` on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Metrics HTTP server listening");
    }
    axum::serve(listener, router()).await
}
