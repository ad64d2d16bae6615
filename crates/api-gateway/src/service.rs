//! Gateway service: wires backends into handlers and serves the router.

use crate::adapters::BusBackend;
use crate::domain::config::{ConfigError, GatewayConfig};
use crate::handlers::{DatacenterHandlers, ServiceHandlers};
use crate::ports::outbound::ResourceBackend;
use crate::router::{build_router, AppState};
use axum::Router;
use shared_bus::{MessageBus, RpcClient, RpcStats};
use shared_types::{Datacenter, Service};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Startup and serving failures.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// The HTTP gateway.
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
    rpc: Option<RpcClient>,
}

impl GatewayService {
    /// Create a gateway over arbitrary backends.
    pub fn new(
        config: GatewayConfig,
        datacenters: Arc<dyn ResourceBackend<Datacenter>>,
        services: Arc<dyn ResourceBackend<Service>>,
    ) -> Result<Self, ServerError> {
        config.validate()?;

        let state = AppState::new(
            DatacenterHandlers::new(datacenters, Arc::clone(&services)),
            ServiceHandlers::new(services),
        );

        Ok(Self {
            config,
            state,
            rpc: None,
        })
    }

    /// Create a gateway whose backends are capabilities on `bus`.
    pub fn from_bus(config: GatewayConfig, bus: Arc<dyn MessageBus>) -> Result<Self, ServerError> {
        let rpc = RpcClient::new(bus, config.rpc_timeout());
        let datacenters = Arc::new(BusBackend::<Datacenter>::new(rpc.clone()));
        let services = Arc::new(BusBackend::<Service>::new(rpc.clone()));

        let mut gateway = Self::new(config, datacenters, services)?;
        gateway.rpc = Some(rpc);
        Ok(gateway)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// RPC counters, when backed by the bus.
    pub fn rpc_stats(&self) -> Option<&RpcStats> {
        self.rpc.as_ref().map(RpcClient::stats)
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(&self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr().map_err(ServerError::Serve)?;
        info!(addr = %local, "HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        info!("HTTP server stopped");
        Ok(())
    }
}
