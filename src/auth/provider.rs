//! Access token providers

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use std::sync::Arc;

/// Source of the access token used for `Authorization: Bearer ...`
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return the current token
    async fn token(&self) -> Result<String>;
}

/// A fixed token
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Create a provider for a literal token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// A token read from an environment variable on every request
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    /// Create a provider reading `var`
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for EnvToken {
    async fn token(&self) -> Result<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(Error::auth(format!(
                "environment variable '{}' is not set",
                self.var
            ))),
        }
    }
}

/// Pick the provider described by a client config
///
/// A literal `token` wins over `token_env`.
pub fn provider_from_config(config: &ClientConfig) -> Arc<dyn AccessTokenProvider> {
    match &config.token {
        Some(token) if !token.is_empty() => Arc::new(StaticToken::new(token.clone())),
        _ => Arc::new(EnvToken::new(config.token_env.clone())),
    }
}

/// Add `Authorization: Bearer <token>` to a request
pub async fn apply_bearer(
    req: RequestBuilder,
    provider: &dyn AccessTokenProvider,
) -> Result<RequestBuilder> {
    let token = provider.token().await?;
    Ok(req.bearer_auth(token))
}
