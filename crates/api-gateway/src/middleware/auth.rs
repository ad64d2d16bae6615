//! Bearer token authentication.
//!
//! Decodes an HS256 token from `Authorization: Bearer <jwt>` into an
//! [`AuthenticatedUser`] and stores it in the request extensions. A missing
//! or invalid token is answered with 401 before any handler runs.

use crate::domain::config::AuthConfig;
use crate::domain::error::GatewayError;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request},
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared_types::{AuthenticatedUser, GroupId};
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Token payload. Registered claims other than `exp` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub group_id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(c: Claims) -> Self {
        AuthenticatedUser::new(c.id, c.username, c.group_id, c.admin)
    }
}

/// Why a request was not authenticated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Verifies tokens against the shared secret.
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
    allow_anonymous_admin: bool,
}

impl TokenDecoder {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is checked when present, not required.
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            allow_anonymous_admin: config.allow_unauthenticated_admin,
        }
    }

    pub fn decode_token(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims.into())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Resolve the principal for a request.
    pub fn authenticate<B>(&self, req: &Request<B>) -> Result<AuthenticatedUser, AuthError> {
        let Some(header) = req.headers().get(AUTHORIZATION) else {
            if self.allow_anonymous_admin {
                return Ok(AuthenticatedUser::new(0, "anonymous", 0, true));
            }
            return Err(AuthError::MissingToken);
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedHeader)?;

        self.decode_token(token)
    }
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    decoder: Arc<TokenDecoder>,
}

impl AuthLayer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoder: Arc::new(TokenDecoder::new(config)),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            decoder: Arc::clone(&self.decoder),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    decoder: Arc<TokenDecoder>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let decoder = Arc::clone(&self.decoder);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match decoder.authenticate(&req) {
                Ok(user) => {
                    debug!(
                        user = %user.username,
                        group_id = user.group_id,
                        admin = user.admin,
                        "Request authenticated"
                    );
                    req.extensions_mut().insert(user);
                    inner.call(req).await
                }
                Err(e) => {
                    warn!(path = %req.uri().path(), error = %e, "Authentication failed");
                    Ok(GatewayError::unauthorized(e.to_string()).into_response())
                }
            }
        })
    }
}
