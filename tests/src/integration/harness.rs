//! Shared fixture: a bus with both capabilities running and a gateway on top.

use api_gateway::{BusBackend, Claims, DatacenterHandlers, GatewayConfig, GatewayService};
use jsonwebtoken::{encode, EncodingKey, Header};
use resource_store::{CapabilityService, InMemoryStore, RunningCapability};
use shared_bus::{InMemoryMessageBus, MessageBus, RpcClient};
use shared_types::{AuthenticatedUser, Datacenter, Service};
use std::sync::Arc;
use std::time::Duration;

pub const SECRET: &str = "integration-secret";

/// Bound for RPC calls made by the fixture.
pub const RPC_TIMEOUT: Duration = Duration::from_millis(500);

pub struct Harness {
    pub bus: Arc<InMemoryMessageBus>,
    pub datacenters: Arc<InMemoryStore<Datacenter>>,
    pub services: Arc<InMemoryStore<Service>>,
    pub gateway: GatewayService,
    capabilities: Vec<RunningCapability>,
}

impl Harness {
    /// Seeded with two tenants' datacenters and one service on datacenter "1".
    pub async fn start() -> Self {
        Self::with(seed_datacenters(), seed_services()).await
    }

    pub async fn with(datacenters: Vec<Datacenter>, services: Vec<Service>) -> Self {
        let bus = Arc::new(InMemoryMessageBus::new());
        let dyn_bus: Arc<dyn MessageBus> = bus.clone();
        let datacenters = Arc::new(InMemoryStore::with_entities(datacenters));
        let services = Arc::new(InMemoryStore::with_entities(services));

        let capabilities = vec![
            CapabilityService::<Datacenter, _>::new(Arc::clone(&dyn_bus), Arc::clone(&datacenters))
                .start()
                .await
                .unwrap(),
            CapabilityService::<Service, _>::new(Arc::clone(&dyn_bus), Arc::clone(&services))
                .start()
                .await
                .unwrap(),
        ];

        let mut config = GatewayConfig::default().with_jwt_secret(SECRET);
        config.timeouts.rpc_ms = RPC_TIMEOUT.as_millis() as u64;
        let gateway = GatewayService::from_bus(config, dyn_bus).unwrap();

        Self {
            bus,
            datacenters,
            services,
            gateway,
            capabilities,
        }
    }

    pub fn rpc(&self) -> RpcClient {
        RpcClient::new(self.bus.clone(), RPC_TIMEOUT)
    }

    /// Datacenter handlers wired to the capabilities over RPC.
    pub fn handlers(&self) -> DatacenterHandlers {
        let rpc = self.rpc();
        DatacenterHandlers::new(
            Arc::new(BusBackend::<Datacenter>::new(rpc.clone())),
            Arc::new(BusBackend::<Service>::new(rpc)),
        )
    }

    /// Stop the capabilities, leaving the bus open with nobody listening.
    pub async fn stop_capabilities(&mut self) {
        for capability in self.capabilities.drain(..) {
            capability.shutdown().await;
        }
    }
}

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(1, "admin", 1, true)
}

pub fn member(group_id: u64) -> AuthenticatedUser {
    AuthenticatedUser::new(100 + group_id, "member", group_id, false)
}

/// `Authorization` header value for `user`.
pub fn bearer(user: &AuthenticatedUser) -> String {
    let claims = Claims {
        id: user.id,
        username: user.username.clone(),
        admin: user.admin,
        group_id: user.group_id,
        exp: None,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

pub fn seed_datacenters() -> Vec<Datacenter> {
    vec![
        Datacenter {
            id: "1".into(),
            group_id: 1,
            name: "test".into(),
            kind: "vcloud".into(),
            username: "user".into(),
            password: "secret".into(),
            vcloud_url: "https://vcloud.example".into(),
            ..Datacenter::default()
        },
        Datacenter {
            id: "2".into(),
            group_id: 2,
            name: "test2".into(),
            kind: "aws".into(),
            access_key_id: "AKIA".into(),
            secret_access_key: "shh".into(),
            ..Datacenter::default()
        },
    ]
}

pub fn seed_services() -> Vec<Service> {
    vec![Service {
        id: "1".into(),
        name: "test".into(),
        group_id: 1,
        datacenter_id: "1".into(),
    }]
}
