//! # Runtime Startup
//!
//! The process wiring from `gateway-runtime`: capabilities started by the
//! runtime answer the gateway it returns, and a failed start leaves nothing
//! subscribed.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{
        admin, bearer, member, seed_datacenters, seed_services, RPC_TIMEOUT, SECRET,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use gateway_runtime::{GatewayRuntime, RuntimeConfig};
    use resource_store::InMemoryStore;
    use serde_json::Value;
    use shared_types::AuthenticatedUser;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.gateway.auth.jwt_secret = SECRET.into();
        config.gateway.timeouts.rpc_ms = RPC_TIMEOUT.as_millis() as u64;
        config.backoff.initial_ms = 1;
        config.backoff.max_attempts = 2;
        config
    }

    fn seeded_runtime(config: RuntimeConfig) -> GatewayRuntime {
        GatewayRuntime::with_stores(
            config,
            Arc::new(InMemoryStore::with_entities(seed_datacenters())),
            Arc::new(InMemoryStore::with_entities(seed_services())),
        )
    }

    fn get(uri: &str, user: &AuthenticatedUser) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(user))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_started_runtime_serves_http_over_bus() {
        let mut runtime = seeded_runtime(config());
        let gateway = runtime.start().await.unwrap();
        let app = gateway.router();

        let response = app
            .clone()
            .oneshot(get("/datacenters", &admin()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let list: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(list.as_array().unwrap().len(), 2);

        let response = app.oneshot(get("/services/1", &member(1))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bus = runtime.bus();
        runtime.shutdown().await;
        assert_eq!(bus.subject_count(), 0);
        assert!(bus.is_closed());
    }

    #[tokio::test]
    async fn test_runtime_shutdown_turns_requests_into_errors() {
        let mut runtime = seeded_runtime(config());
        let gateway = runtime.start().await.unwrap();
        runtime.shutdown().await;

        let response = gateway
            .router()
            .oneshot(get("/datacenters", &admin()))
            .await
            .unwrap();
        assert!(response.status().is_server_error());
    }

    #[tokio::test]
    async fn test_run_without_secret_leaves_bus_clean() {
        let mut config = config();
        config.gateway.auth.jwt_secret.clear();
        let runtime = seeded_runtime(config);
        let bus = runtime.bus();

        assert!(runtime.run(async {}).await.is_err());
        assert_eq!(bus.subject_count(), 0);
    }
}
