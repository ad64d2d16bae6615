//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `AuthenticatedUser`, `GroupId`
//! - **Resources**: `Datacenter`, `Service`
//!
//! Resources are exclusively owned by one tenant (`group_id`). Ownership is
//! stamped by the gateway at creation time and never trusted from clients.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Tenant identifier.
pub type GroupId = u64;

/// Identifier assigned by the backing store.
pub type EntityId = String;

/// Group value of a principal that has not been assigned to any tenant.
pub const UNASSIGNED_GROUP: GroupId = 0;

/// Principal decoded from the bearer credential of one request.
///
/// Created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuthenticatedUser {
    #[serde(default)]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub group_id: GroupId,
    #[serde(default)]
    pub admin: bool,
}

impl AuthenticatedUser {
    pub fn new(id: u64, username: impl Into<String>, group_id: GroupId, admin: bool) -> Self {
        Self {
            id,
            username: username.into(),
            group_id,
            admin,
        }
    }

    /// Whether the principal belongs to a tenant.
    pub fn has_group(&self) -> bool {
        self.group_id != UNASSIGNED_GROUP
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// A tenant-owned entity that can be stored and served over the bus.
///
/// `KIND` is the subject prefix for the entity's capabilities
/// (`<KIND>.get`, `<KIND>.find`, `<KIND>.set`, `<KIND>.del`).
pub trait Resource:
    Serialize + DeserializeOwned + Clone + Default + Send + Sync + std::fmt::Debug + 'static
{
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: EntityId);
    fn name(&self) -> &str;
    fn group_id(&self) -> GroupId;
    fn set_group_id(&mut self, group_id: GroupId);
}

/// A cloud datacenter and the credentials used to reach it.
///
/// `name` is unique across all tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Datacenter {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub group_id: GroupId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_key_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_access_key: String,
    #[serde(default)]
    pub vcloud_url: String,
}

impl Datacenter {
    /// Strip secret credential fields.
    pub fn redact(&mut self) {
        self.password.clear();
        self.access_key_id.clear();
        self.secret_access_key.clear();
    }

    /// True when no secret field carries a value.
    pub fn is_redacted(&self) -> bool {
        self.password.is_empty() && self.access_key_id.is_empty() && self.secret_access_key.is_empty()
    }
}

impl Resource for Datacenter {
    const KIND: &'static str = "datacenter";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn group_id(&self) -> GroupId {
        self.group_id
    }

    fn set_group_id(&mut self, group_id: GroupId) {
        self.group_id = group_id;
    }
}

/// A deployed service. While it exists, its datacenter cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Service {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group_id: GroupId,
    #[serde(default)]
    pub datacenter_id: EntityId,
}

impl Resource for Service {
    const KIND: &'static str = "service";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn group_id(&self) -> GroupId {
        self.group_id
    }

    fn set_group_id(&mut self, group_id: GroupId) {
        self.group_id = group_id;
    }
}
