pub mod error;
pub mod route;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::config::Config;
use crate::error::{DispatcherError, DispatcherResult};
use crate::server::route::server_router;
use crate::types::params::ServerParams;

/// Handle for managing the HTTP server lifecycle.
pub struct ServerHandle {
    shutdown_token: CancellationToken,
    task_handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Initiates graceful shutdown: stop accepting connections, let
    /// in-flight requests finish, then return.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Initiating server graceful shutdown");
        self.shutdown_token.cancel();
        self.task_handle.await
    }
}

/// Binds the listener and serves the dispatch routes in a background task.
pub async fn setup_server(config: Arc<Config>) -> DispatcherResult<(SocketAddr, ServerHandle)> {
    let (api_server_url, listener) = get_server_url(config.server_params()).await?;

    let shutdown_token = CancellationToken::new();
    let server_token = shutdown_token.clone();

    let app = server_router(config);
    let task_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(server_token.cancelled_owned())
            .await
            .expect("Failed to start axum server")
    });

    info!(address = %api_server_url, "Server listening");
    Ok((api_server_url, ServerHandle { shutdown_token, task_handle }))
}

pub(crate) async fn get_server_url(
    server_params: &ServerParams,
) -> DispatcherResult<(SocketAddr, tokio::net::TcpListener)> {
    // Port 0 in tests so parallel runs never collide on an address.
    let port = if cfg!(test) { 0 } else { server_params.port };

    let address = format!("{}:{}", server_params.host, port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| DispatcherError::ServerError(format!("Failed to bind {}: {}", address, e)))?;
    let api_server_url = listener
        .local_addr()
        .map_err(|e| DispatcherError::ServerError(format!("Unable to resolve listener address: {}", e)))?;

    Ok((api_server_url, listener))
}
