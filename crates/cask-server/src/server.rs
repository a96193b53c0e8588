use std::sync::Arc;

use axum::Router;
use cask_gateway::BlobGateway;
use cask_store::BlobStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Cask blob gateway server.
pub struct CaskServer {
    config: ServerConfig,
    state: AppState,
}

impl CaskServer {
    /// Wire a gateway around `store` per the config and prepare to serve.
    pub fn new(config: ServerConfig, store: Arc<dyn BlobStore>) -> Self {
        let gateway = Arc::new(BlobGateway::with_options(
            store.clone(),
            config.gateway_options(),
        ));
        Self {
            config,
            state: AppState { gateway, store },
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), self.config.max_upload_bytes)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("cask server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
