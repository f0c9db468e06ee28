//! SRAT CLI - reimbursement requests and approvals from the terminal
//!
//! Every command runs against the local dataset file:
//! - Field staff submit itemized requests
//! - Facilitator, Coordinator, PI and Finance move them along the chain
//! - Anyone who can see a request may attach files or sign it
//! - Admins edit category templates and create users

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;
mod session;

use commands::{requests, templates, users};
use config::CliConfig;
use error::CliResult;
use session::Session;

/// SRAT CLI application
#[derive(Parser)]
#[command(name = "srat")]
#[command(about = "SRAT - reimbursement requests and approvals", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SRAT_CONFIG", global = true)]
    config: Option<String>,

    /// Dataset file (overrides data_file from the config)
    #[arg(short, long, env = "SRAT_DATA", global = true)]
    data: Option<PathBuf>,

    /// Username to act as
    #[arg(short, long, env = "SRAT_USER", global = true)]
    user: Option<String>,

    /// Password for --user
    #[arg(long, env = "SRAT_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Submit and process reimbursement requests
    #[command(alias = "req")]
    Requests {
        #[command(subcommand)]
        command: requests::RequestCommands,
    },

    /// Manage category templates
    Templates {
        #[command(subcommand)]
        command: templates::TemplateCommands,
    },

    /// Manage users
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },

    /// Show the logged-in user
    Whoami,

    /// Show resolved configuration
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let settings = config.resolve(cli.data.as_deref())?;

    if let Commands::Config = cli.command {
        return output::print_single(&settings, cli.output);
    }

    let mut session = Session::open(&settings).await?;
    let actor = session
        .login(cli.user.as_deref(), cli.password.as_deref())
        .await?;
    tracing::debug!(user = %actor.username, role = %actor.role, "Logged in");

    match cli.command {
        Commands::Requests { command } => {
            requests::execute(command, &mut session, &actor, cli.output).await
        }
        Commands::Templates { command } => {
            templates::execute(command, &mut session, &actor, cli.output).await
        }
        Commands::Users { command } => {
            users::execute(command, &mut session, &actor, cli.output).await
        }
        Commands::Whoami => output::print_single(&actor, cli.output),
        Commands::Config => Ok(()),
    }
}
