//! Saldo CLI - bank dashboard in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{show, watch};

/// Saldo - bank balances, payments, and today's expenses in your terminal
#[derive(Parser)]
#[command(name = "saldo", version, about, long_about = None)]
struct Cli {
    /// Directory holding settings.json
    #[arg(long, env = "SALDO_DIR", global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one refresh cycle and print the dashboard
    Show {
        /// Output the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Refresh on the configured interval and keep printing the dashboard
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let dir = commands::saldo_dir(cli.dir)?;
    match cli.command {
        Commands::Show { json } => show::run(&dir, json).await,
        Commands::Watch => watch::run(&dir).await,
    }
}
