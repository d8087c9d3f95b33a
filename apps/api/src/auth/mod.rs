//! Bearer-token authentication.
//!
//! The hosted identity provider owns sign-in; this module only turns an
//! `Authorization: Bearer <token>` header into a user id. Handlers take an
//! `AuthUser` argument and never see tokens.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Token rejected by identity provider")]
    Rejected,

    #[error("Identity provider HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider returned status {0}")]
    Upstream(u16),
}

/// Resolves a bearer token to the id of the user it was issued to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Uuid, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
}

/// Validates tokens against the provider's `GET /auth/v1/user` endpoint.
#[derive(Clone)]
pub struct HostedIdentity {
    client: Client,
    base_url: String,
    service_key: String,
}

impl HostedIdentity {
    pub fn new(base_url: &str, service_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentity {
    async fn resolve(&self, token: &str) -> Result<Uuid, IdentityError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(token)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let status = response.status();
        if matches!(status.as_u16(), 401 | 403) {
            return Err(IdentityError::Rejected);
        }
        if !status.is_success() {
            return Err(IdentityError::Upstream(status.as_u16()));
        }

        let user: ProviderUser = response.json().await?;
        Ok(user.id)
    }
}

/// The authenticated caller. Extracting it rejects the request with 401 if
/// the bearer token is missing or refused.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        match state.identity.resolve(token).await {
            Ok(user_id) => Ok(AuthUser(user_id)),
            Err(IdentityError::Rejected) => Err(AppError::Unauthorized),
            Err(e) => {
                warn!("Identity provider unavailable: {e}");
                Err(AppError::Internal(anyhow::anyhow!(e)))
            }
        }
    }
}
