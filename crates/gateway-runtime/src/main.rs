//! Tenant gateway entry point.

use anyhow::{Context, Result};
use gateway_runtime::{init_tracing, GatewayRuntime, RuntimeConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let (log_level, log_json) = RuntimeConfig::log_settings_from_env();
    init_tracing(&log_level, log_json)?;
    let config = RuntimeConfig::from_env();

    info!(
        addr = %config.gateway.http_addr(),
        rpc_timeout_ms = config.gateway.timeouts.rpc_ms,
        "Starting tenant gateway"
    );

    let runtime = GatewayRuntime::new(config);
    runtime
        .run(shutdown_signal())
        .await
        .context("gateway exited with an error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, stopping"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C, stopping"),
    }
}
