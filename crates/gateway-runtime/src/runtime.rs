//! Process wiring: bus, capabilities, gateway.

use crate::config::RuntimeConfig;
use anyhow::{Context, Result};
use api_gateway::GatewayService;
use resource_store::{CapabilityService, InMemoryStore, RunningCapability};
use shared_bus::{retry_with_backoff, BusError, InMemoryMessageBus, MessageBus};
use shared_types::{Datacenter, Service};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// The running gateway process.
///
/// ## Startup Sequence
///
/// 1. Validate the gateway config
/// 2. Wait for the message bus (backoff until reachable)
/// 3. Start the datacenter and service capabilities
/// 4. Build the gateway over bus-backed backends
/// 5. Serve HTTP until the shutdown signal
/// 6. Stop capability tasks (also after a failed start)
pub struct GatewayRuntime {
    config: RuntimeConfig,
    bus: Arc<InMemoryMessageBus>,
    datacenters: Arc<InMemoryStore<Datacenter>>,
    services: Arc<InMemoryStore<Service>>,
    capabilities: Vec<RunningCapability>,
}

impl GatewayRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        )
    }

    /// Start over pre-seeded stores.
    pub fn with_stores(
        config: RuntimeConfig,
        datacenters: Arc<InMemoryStore<Datacenter>>,
        services: Arc<InMemoryStore<Service>>,
    ) -> Self {
        Self {
            config,
            bus: Arc::new(InMemoryMessageBus::new()),
            datacenters,
            services,
            capabilities: Vec::new(),
        }
    }

    pub fn bus(&self) -> Arc<InMemoryMessageBus> {
        Arc::clone(&self.bus)
    }

    /// Bring up the bus and capabilities and return the gateway to serve.
    ///
    /// The gateway config is validated before anything subscribes.
    pub async fn start(&mut self) -> Result<GatewayService> {
        self.config
            .gateway
            .validate()
            .context("invalid gateway configuration")?;

        let bus = Arc::clone(&self.bus);
        retry_with_backoff(&self.config.backoff.policy(), "message bus", || {
            let bus = Arc::clone(&bus);
            async move {
                if bus.is_closed() {
                    Err(BusError::Closed)
                } else {
                    Ok(())
                }
            }
        })
        .await
        .context("message bus never became reachable")?;
        info!("Message bus ready");

        let dyn_bus: Arc<dyn MessageBus> = self.bus.clone();

        let datacenters =
            CapabilityService::<Datacenter, _>::new(Arc::clone(&dyn_bus), Arc::clone(&self.datacenters))
                .start()
                .await
                .context("failed to start datacenter capability")?;
        self.capabilities.push(datacenters);

        let services =
            CapabilityService::<Service, _>::new(Arc::clone(&dyn_bus), Arc::clone(&self.services))
                .start()
                .await
                .context("failed to start service capability")?;
        self.capabilities.push(services);

        info!(
            capabilities = self.capabilities.len(),
            subjects = self.bus.subject_count(),
            "Capabilities started"
        );

        GatewayService::from_bus(self.config.gateway.clone(), dyn_bus)
            .context("failed to create gateway")
    }

    /// Start, serve until `shutdown` resolves, then stop everything.
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let gateway = match self.start().await {
            Ok(gateway) => gateway,
            Err(e) => {
                self.shutdown().await;
                return Err(e);
            }
        };
        let served = gateway.serve(shutdown).await;
        self.shutdown().await;
        served.context("HTTP server failed")
    }

    /// Stop capability tasks and close the bus.
    pub async fn shutdown(&mut self) {
        info!("Initiating graceful shutdown...");
        for capability in self.capabilities.drain(..) {
            capability.shutdown().await;
        }
        self.bus.close();
        info!("Shutdown complete");
    }
}
