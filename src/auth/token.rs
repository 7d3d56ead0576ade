//! Token lookup chain

use crate::auth::{AuthSource, CredentialProvider};
use crate::config::{Config, TOKEN_ENV, non_empty_env};
use crate::error::{Error, Result};
use crate::platform::RemoteService;
use async_trait::async_trait;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get authentication
///
/// Priority:
/// 1. Explicit token (`--token`)
/// 2. `ITERCR_TOKEN` environment variable
/// 3. `token` in the discovered config file
pub fn get_auth(explicit: Option<&str>, config: &Config) -> Result<AuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(AuthConfig {
            token: token.to_string(),
            source: AuthSource::Explicit,
        });
    }

    if let Some(token) = non_empty_env(TOKEN_ENV) {
        return Ok(AuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Some(token) = &config.token {
        return Ok(AuthConfig {
            token: token.clone(),
            source: AuthSource::ConfigFile,
        });
    }

    Err(Error::NoCredential(format!(
        "No token found. Pass --token, set {TOKEN_ENV}, or add `token` to the config file"
    )))
}

/// Provider that walks the lookup chain on every request
///
/// Looking up lazily lets commands that never reach the remote run without a
/// token.
#[derive(Debug, Clone)]
pub struct TokenChain {
    explicit: Option<String>,
    config: Config,
}

impl TokenChain {
    /// Chain over an optional explicit token and the loaded config
    pub const fn new(explicit: Option<String>, config: Config) -> Self {
        Self { explicit, config }
    }
}

#[async_trait]
impl CredentialProvider for TokenChain {
    async fn token(&self) -> Result<String> {
        get_auth(self.explicit.as_deref(), &self.config).map(|auth| auth.token)
    }
}

/// Fixed token, or none at all
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| Error::NoCredential("no token configured".to_string()))
    }
}

/// Test authentication by listing users; returns how many are visible
pub async fn test_auth(remote: &dyn RemoteService) -> Result<usize> {
    let users = remote.list_users().await?;
    Ok(users.len())
}
