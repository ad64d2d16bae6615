//! Request body validation for datacenters.

use crate::domain::error::GatewayError;
use serde::Deserialize;
use shared_types::Datacenter;

pub const TYPE_VCLOUD: &str = "vcloud";
pub const TYPE_AWS: &str = "aws";

/// Check the fields a datacenter needs before it can be created.
///
/// `name` and `type` are always required; the provider type decides which
/// credentials must be present.
pub fn validate_datacenter(dc: &Datacenter) -> Result<(), GatewayError> {
    if dc.name.trim().is_empty() {
        return Err(GatewayError::validation("Datacenter name is empty"));
    }
    if dc.kind.trim().is_empty() {
        return Err(GatewayError::validation("Datacenter type is empty"));
    }

    match dc.kind.as_str() {
        TYPE_VCLOUD => {
            require(&dc.username, "Datacenter username is empty")?;
            require(&dc.password, "Datacenter password is empty")?;
            require(&dc.vcloud_url, "Datacenter vcloud_url is empty")?;
        }
        TYPE_AWS => {
            require(&dc.access_key_id, "Datacenter access_key_id is empty")?;
            require(&dc.secret_access_key, "Datacenter secret_access_key is empty")?;
        }
        _ => {}
    }

    Ok(())
}

fn require(value: &str, message: &str) -> Result<(), GatewayError> {
    if value.is_empty() {
        Err(GatewayError::validation(message))
    } else {
        Ok(())
    }
}

/// Credential fields accepted by an update. Absent fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialsUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl CredentialsUpdate {
    /// Copy the supplied credentials onto `dc`. Nothing else is touched.
    pub fn apply(self, dc: &mut Datacenter) {
        if let Some(username) = self.username {
            dc.username = username;
        }
        if let Some(password) = self.password {
            dc.password = password;
        }
        if let Some(access_key_id) = self.access_key_id {
            dc.access_key_id = access_key_id;
        }
        if let Some(secret_access_key) = self.secret_access_key {
            dc.secret_access_key = secret_access_key;
        }
    }
}

/// Parse a JSON request body, mapping any failure to a validation error.
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body)
        .map_err(|e| GatewayError::validation(format!("Invalid request body: {}", e)))
}
