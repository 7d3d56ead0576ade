//! Remote service factory
//!
//! Creates the review service client from configuration.

use crate::auth::TokenChain;
use crate::config::Config;
use crate::error::Result;
use crate::platform::{HttpRemoteService, RemoteService};
use std::sync::Arc;
use std::time::Duration;

/// Create the remote service from configuration
///
/// The token is looked up on each request, so this succeeds without
/// credentials; the first remote call then fails with `NoCredential`.
pub fn create_remote_service(
    config: &Config,
    explicit_token: Option<String>,
) -> Result<Arc<dyn RemoteService>> {
    let credentials = Arc::new(TokenChain::new(explicit_token, config.clone()));
    Ok(Arc::new(HttpRemoteService::new(
        &config.api_url,
        credentials,
        Duration::from_secs(config.request_timeout_secs),
    )?))
}
