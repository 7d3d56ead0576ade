//! Auth command - test and explain authentication

use crate::cli::AppContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use itercr::auth::{get_auth, test_auth};
use itercr::config::{CONFIG_ENV, TOKEN_ENV, discover_config_file};
use itercr::error::Result;

/// Auth subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Check the token against the service
    Test,
    /// Print setup instructions
    Setup,
}

/// Run the auth test command
pub async fn run_auth_test(ctx: &AppContext) -> Result<()> {
    println!("Testing authentication against {}...", ctx.config.api_url.accent());
    let auth = get_auth(ctx.token.as_deref(), &ctx.config)?;
    let remote = ctx.remote()?;
    let users = test_auth(remote.as_ref()).await?;
    println!("{} Authenticated ({users} users visible)", check());
    println!("Token source: {:?}", auth.source);
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    let config_path = discover_config_file().map_or_else(
        || "<config dir>/itercr/config.toml".to_string(),
        |p| p.display().to_string(),
    );

    println!("{}", "Authentication Setup".emphasis());
    println!("====================");
    println!();
    println!("Option 1: Command line");
    println!("  itercr --token <token> ...");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set {TOKEN_ENV}");
    println!();
    println!("Option 3: Config file ({config_path})");
    println!("  token = \"<token>\"");
    println!("  api_url = \"https://review.example.com/api\"");
    println!();
    println!("{}", format!("Set {CONFIG_ENV} to use a different config file.").muted());
}

/// Wrapper for auth commands
pub async fn run_auth(ctx: &AppContext, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Test => run_auth_test(ctx).await,
        AuthAction::Setup => {
            run_auth_setup();
            Ok(())
        }
    }
}
