//! Error conversions from infrastructure types.
//!
//! These conversions involve transport and HTTP types and belong in the
//! adapters layer.

use crate::domain::error::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use resource_store::StoreError;
use shared_bus::RpcError;
use tracing::{error, warn};

impl From<RpcError> for GatewayError {
    fn from(e: RpcError) -> Self {
        match e {
            RpcError::Timeout { .. } => GatewayError::Timeout(e.to_string()),
            other => GatewayError::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        GatewayError::Internal(e.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self {
            GatewayError::Internal(message) => error!(message = %message, "Request failed"),
            GatewayError::Timeout(message) => warn!(message = %message, "Backend timed out"),
            _ => {}
        }

        let mut response = (status, Json(self.body())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
