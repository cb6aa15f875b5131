//! HTTP server lifecycle.

use std::future::Future;
use std::net::SocketAddr;

use roster_core::{AppState, ConfigProvider, Result};
use tokio::net::TcpListener;

use crate::router::{router, ApiState};

/// Bind a listener on `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    Ok(TcpListener::bind(addr).await?)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ApiState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "serving roster API");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("roster API stopped");
    Ok(())
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn run<C: ConfigProvider>(state: &AppState<C>) -> Result<()> {
    let listener = bind(state.config().bind_address()?).await?;
    serve(listener, ApiState::from(state), shutdown_signal()).await
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
