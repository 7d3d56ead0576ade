//! Authentication for the review service
//!
//! Supports an explicit token, an environment variable, and the config file.

mod token;

pub use token::{AuthConfig, StaticToken, TokenChain, get_auth, test_auth};

use crate::error::Result;
use async_trait::async_trait;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed explicitly (`--token`)
    Explicit,
    /// Token from environment variable
    EnvVar,
    /// Token from the config file
    ConfigFile,
}

/// Supplies bearer tokens to the remote client
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `Error::NoCredential`
    async fn token(&self) -> Result<String>;
}
