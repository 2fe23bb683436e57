//! Banco CLI - account scenarios and transfers from the command line
//!
//! Usage:
//! ```bash
//! banco run demos/bna.json
//! banco run demos/bna.json --format json
//! banco transfer --from Dafne=1500.8989 --to Rocio=2500 --amount 500 --bank BNA
//! BANCO_LOG=debug banco run demos/bna.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{run, transfer};

/// Banco - accounts, a bank, and transfers with exact decimal balances
#[derive(Parser)]
#[command(name = "banco")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter (e.g. warn, info, banco_core=debug); RUST_LOG wins when set
    #[arg(long, env = "BANCO_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a JSON scenario and print the report
    Run {
        /// Scenario file
        file: PathBuf,
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Transfer between two fresh accounts
    Transfer {
        /// Source account as OWNER=BALANCE
        #[arg(long, value_parser = transfer::parse_account_arg)]
        from: transfer::AccountArg,
        /// Destination account as OWNER=BALANCE
        #[arg(long, value_parser = transfer::parse_account_arg)]
        to: transfer::AccountArg,
        /// Amount to move
        #[arg(long)]
        amount: Decimal,
        /// Bank name
        #[arg(long, default_value = "")]
        bank: String,
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Run { file, format } => {
            run::run_scenario(&file, format)?;
        }

        Commands::Transfer {
            from,
            to,
            amount,
            bank,
            format,
        } => {
            transfer::transfer(from, to, amount, &bank, format)?;
        }
    }

    Ok(())
}
