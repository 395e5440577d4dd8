//! HTTP server implementation

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handlers::{execute_rpc, stats_handler};
use crate::engine::Engine;

/// Build the application router
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/rpc", post(execute_rpc))
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

/// Serve the engine until `shutdown` resolves
pub async fn run_web_server<F>(
    addr: SocketAddr,
    engine: Arc<Engine>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(engine);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
