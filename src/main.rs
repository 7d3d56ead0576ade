//! itercr - iteration and code-review requests
//!
//! CLI binary for assembling and submitting iteration records.

use anyhow::Result;
use clap::{Parser, Subcommand};
use itercr::config::{CliOverrides, Config};
use itercr::logging::init_logging;
use std::path::PathBuf;

mod cli;

use cli::AppContext;

#[derive(Parser)]
#[command(name = "itercr")]
#[command(about = "Assemble and submit iteration + code-review requests")]
#[command(version)]
struct Cli {
    /// Path to the git workspace (defaults to the current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Review service base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token for the review service
    #[arg(long, global = true)]
    token: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a record file ({basicInfo, projectInfo, modules})
    Submit {
        /// JSON record file
        file: PathBuf,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Drive the workflow with JSON lines over stdio
    Serve,

    /// Print what the workspace says about itself
    Detect,

    /// List remote projects
    Projects,

    /// Show recently submitted iterations
    History,

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&CliOverrides {
        api_url: cli.api_url,
    })?;
    let ctx = AppContext {
        config,
        token: cli.token,
        path: cli.path,
    };

    match cli.command {
        None => {
            // Default: interactive mode
            cli::run_interactive(&ctx).await?;
        }
        Some(Commands::Submit {
            file,
            dry_run,
            yes,
        }) => {
            cli::run_submit(&ctx, &file, dry_run, yes).await?;
        }
        Some(Commands::Serve) => cli::run_serve(&ctx).await?,
        Some(Commands::Detect) => cli::run_detect(&ctx).await?,
        Some(Commands::Projects) => cli::run_projects(&ctx).await?,
        Some(Commands::History) => cli::run_history(&ctx)?,
        Some(Commands::Auth { action }) => {
            let action = match action {
                AuthAction::Test => cli::AuthAction::Test,
                AuthAction::Setup => cli::AuthAction::Setup,
            };
            cli::run_auth(&ctx, action).await?;
        }
    }

    Ok(())
}
