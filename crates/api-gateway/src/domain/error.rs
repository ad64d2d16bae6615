//! Gateway error taxonomy and its HTTP status mapping.
//!
//! Handlers never recover locally: every failure from validation,
//! authorization, the backend or serialization becomes one of these and is
//! returned to the caller as-is.

use serde::{Deserialize, Serialize};

/// HTTP status codes used by the gateway.
pub mod codes {
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const INTERNAL_ERROR: u16 = 500;
    pub const GATEWAY_TIMEOUT: u16 = 504;
}

/// Failure of one gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Malformed or missing fields.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials, or a principal without a group.
    #[error("{0}")]
    Unauthorized(String),

    /// Caller does not own the target resource.
    #[error("{0}")]
    Forbidden(String),

    /// Duplicate name or a delete blocked by dependents.
    #[error("{0}")]
    Conflict(String),

    /// Missing entity, or one outside the caller's tenant.
    #[error("{0}")]
    NotFound(String),

    /// Serialization, store or transport failure.
    #[error("{0}")]
    Internal(String),

    /// The backend did not answer in time.
    #[error("{0}")]
    Timeout(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Uniform not-found for a resource kind. The message never reveals
    /// whether the entity exists in another tenant.
    pub fn not_found(kind: &str) -> Self {
        Self::NotFound(format!("{} not found", kind))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => codes::BAD_REQUEST,
            Self::Unauthorized(_) => codes::UNAUTHORIZED,
            Self::Forbidden(_) => codes::FORBIDDEN,
            Self::NotFound(_) => codes::NOT_FOUND,
            Self::Conflict(_) => codes::CONFLICT,
            Self::Internal(_) => codes::INTERNAL_ERROR,
            Self::Timeout(_) => codes::GATEWAY_TIMEOUT,
        }
    }

    /// Response body for this error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.status_code(),
            message: self.to_string(),
        }
    }
}

/// JSON error body: `{"code": 409, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
