//! Process configuration loaded from the environment.
//!
//! | Variable | Field |
//! |---|---|
//! | `GW_HTTP_HOST` | `gateway.http.host` |
//! | `GW_HTTP_PORT` | `gateway.http.port` |
//! | `GW_RPC_TIMEOUT_MS` | `gateway.timeouts.rpc_ms` |
//! | `JWT_SECRET` | `gateway.auth.jwt_secret` |
//! | `GW_ALLOW_ANONYMOUS_ADMIN` | `gateway.auth.allow_unauthenticated_admin` |
//! | `GW_CORS_ORIGINS` | `gateway.cors.allowed_origins` (comma separated) |
//! | `GW_LOG_LEVEL` | `log_level` |
//! | `GW_LOG_JSON` | `log_json` |
//! | `GW_BUS_BACKOFF_INITIAL_MS` / `_MAX_MS` / `_ATTEMPTS` | `backoff` |
//!
//! Unparseable values are logged and ignored. The binary installs its
//! subscriber from [`RuntimeConfig::log_settings`] first so those warnings
//! are not lost.

use api_gateway::GatewayConfig;
use shared_bus::BackoffPolicy;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Bus readiness backoff, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffConfig {
    pub initial_ms: u64,
    pub max_ms: u64,
    /// 0 = retry forever
    pub max_attempts: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_ms: 100,
            max_ms: 5_000,
            max_attempts: 30,
        }
    }
}

impl BackoffConfig {
    pub fn policy(&self) -> BackoffPolicy {
        BackoffPolicy {
            initial: Duration::from_millis(self.initial_ms),
            max: Duration::from_millis(self.max_ms),
            max_attempts: (self.max_attempts > 0).then_some(self.max_attempts),
        }
    }
}

/// Everything the runtime needs to start.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub gateway: GatewayConfig,
    pub log_level: String,
    pub log_json: bool,
    pub backoff: BackoffConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            log_level: "info".to_string(),
            log_json: false,
            backoff: BackoffConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn log_settings_from_env() -> (String, bool) {
        Self::log_settings(|key| std::env::var(key).ok())
    }

    /// Log level and JSON flag only, parsed without logging.
    pub fn log_settings<F>(lookup: F) -> (String, bool)
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let level = lookup("GW_LOG_LEVEL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_level);
        let json = lookup("GW_LOG_JSON")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.log_json);
        (level, json)
    }

    /// Build from any key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_parsed(&lookup, "GW_HTTP_HOST", &mut config.gateway.http.host);
        override_parsed(&lookup, "GW_HTTP_PORT", &mut config.gateway.http.port);
        override_parsed(
            &lookup,
            "GW_RPC_TIMEOUT_MS",
            &mut config.gateway.timeouts.rpc_ms,
        );
        override_parsed(
            &lookup,
            "GW_ALLOW_ANONYMOUS_ADMIN",
            &mut config.gateway.auth.allow_unauthenticated_admin,
        );
        override_parsed(&lookup, "GW_LOG_JSON", &mut config.log_json);
        override_parsed(
            &lookup,
            "GW_BUS_BACKOFF_INITIAL_MS",
            &mut config.backoff.initial_ms,
        );
        override_parsed(&lookup, "GW_BUS_BACKOFF_MAX_MS", &mut config.backoff.max_ms);
        override_parsed(
            &lookup,
            "GW_BUS_BACKOFF_ATTEMPTS",
            &mut config.backoff.max_attempts,
        );

        if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            config.gateway.auth.jwt_secret = secret;
            info!("Loaded JWT secret from environment");
        }

        if let Some(level) = lookup("GW_LOG_LEVEL").filter(|s| !s.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }

        if let Some(origins) = lookup("GW_CORS_ORIGINS") {
            let parsed: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
            if !parsed.is_empty() {
                config.gateway.cors.allowed_origins = parsed;
            }
        }

        config
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!(key, value = %raw, "Ignoring invalid environment value"),
    }
}
