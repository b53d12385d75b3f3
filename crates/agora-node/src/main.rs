//! Agora node - runs the referendum ledger behind the JSON-RPC surface.
//!
//! Loads configuration, restores the ledger snapshot if one exists,
//! serves RPC until ctrl-c, then persists the snapshot.

pub mod config;
pub mod telemetry;

use agora_ledger::{Ledger, LedgerSnapshot};
use agora_rpc::{ApiContext, RpcServer};
use agora_types::Address;
use anyhow::Context;
use clap::Parser;
use config::NodeConfig;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "agora-node")]
#[command(about = "AGORA referendum ledger daemon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Administrator address override
    #[arg(long, env = "AGORA_ADMINISTRATOR")]
    administrator: Option<Address>,

    /// RPC listen address override
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Write the effective config to the given path and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => NodeConfig::from_file(path)?,
        None => NodeConfig::default(),
    };
    if let Some(administrator) = args.administrator {
        config.ledger.administrator = administrator;
    }
    if let Some(listen) = args.listen {
        config.rpc.listen_addr = listen;
    }

    if let Some(path) = &args.init_config {
        config.to_file(path)?;
        println!("wrote config to {}", path.display());
        return Ok(());
    }

    telemetry::init_telemetry(&config.logging.level, config.logging.json)?;
    config.validate()?;

    let ledger = load_ledger(&config)?;
    tracing::info!(
        name = %config.name,
        administrator = %config.ledger.administrator,
        referendums = ledger.count(),
        "starting"
    );

    let ctx = ApiContext::new(ledger);
    let shared = ctx.ledger().clone();

    let mut server = RpcServer::new(config.rpc.clone().into(), ctx);
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("rpc server: {}", e))?;

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    tracing::info!("shutdown signal received");

    server.stop();
    save_snapshot(&config.state_file, &shared.read().snapshot())?;

    Ok(())
}

/// Restore the ledger from the snapshot file, or start empty.
fn load_ledger(config: &NodeConfig) -> anyhow::Result<Ledger> {
    if config.state_file.exists() {
        let contents = std::fs::read_to_string(&config.state_file)
            .with_context(|| format!("reading {}", config.state_file.display()))?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", config.state_file.display()))?;
        tracing::info!(
            referendums = snapshot.referendums.len(),
            "restored ledger snapshot"
        );
        Ledger::restore(config.ledger.clone(), snapshot).map_err(Into::into)
    } else {
        Ledger::new(config.ledger.clone()).map_err(Into::into)
    }
}

/// Persist the durable state.
fn save_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "ledger snapshot saved");
    Ok(())
}
