//! CardBank CLI - terminal front end for the card-banking demo
//!
//! Talks to two services: the transaction gateway (writes) and the core
//! banking service (reads). Sessions persist between runs, so a signed-in
//! customer lands straight on their dashboard next time.
//!
//! # Quick Start
//!
//! ```bash
//! # Start the portal against local services
//! cardbank
//!
//! # Point at other services
//! cardbank --gateway-url http://gateway:8081/api/v1 --core-url http://core:8082/api/v2/banking
//!
//! # Deep-link straight to the admin view (guards still apply)
//! cardbank run --path /admin
//!
//! # Inspect or erase the persisted session
//! cardbank session show
//! cardbank session clear
//! ```
//!
//! Settings also come from `config/default.toml`, `config/local.toml` and
//! `CARDBANK__*` variables, e.g. `CARDBANK__DASHBOARD__REFRESH_DELAY_MS=250`.

use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod display;
mod logging;

use commands::{run, session};
use crate::config::AppConfig;

/// CardBank - card banking in the terminal
#[derive(Parser)]
#[command(name = "cardbank")]
#[command(author = "CardBank Contributors")]
#[command(version)]
#[command(about = "Customer and admin portal for the CardBank demo services", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, global = true, env = "CARDBANK_CONFIG")]
    config: Option<String>,

    /// Transaction gateway base URL
    #[arg(long, global = true)]
    gateway_url: Option<String>,

    /// Core banking service base URL
    #[arg(long, global = true)]
    core_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal portal (default)
    Run {
        /// Route to open instead of the session's home, e.g. /admin
        #[arg(long)]
        path: Option<String>,
    },

    /// Inspect the persisted session
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Print the persisted role and card
    Show,

    /// Erase the persisted session
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .context("loading configuration")?
        .with_overrides(cli.gateway_url, cli.core_url);
    logging::init_logging(&config.logging).context("initializing logging")?;

    match cli.command.unwrap_or(Commands::Run { path: None }) {
        Commands::Run { path } => run::run(&config, path.as_deref()).await,
        Commands::Session { action } => {
            let path = config.session.storage_path();
            match action {
                SessionCommands::Show => session::show(&path),
                SessionCommands::Clear => session::clear(&path),
            }
        }
    }
}
