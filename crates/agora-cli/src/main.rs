//! Agora CLI - command-line interface for the AGORA referendum ledger.

pub mod commands;
pub mod output;
pub mod rpc_client;

use clap::Parser;
use colored::Colorize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    if let Err(e) = commands::execute(cli.command, cli.rpc, cli.caller).await {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }

    Ok(())
}
