//! CLI command implementations.
//!
//! One subcommand per ledger operation. Privileged commands send the
//! caller address from `--caller` / `AGORA_CALLER`; the node checks it
//! against the configured administrator.

use agora_types::{amount, Address};
use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use serde_json::json;

use crate::output::*;
use crate::rpc_client::RpcClient;

/// Main CLI.
#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "AGORA referendum ledger CLI")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// RPC endpoint URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8640")]
    pub rpc: String,

    /// Caller address (agora1... or 0x...)
    #[arg(long, global = true, env = "AGORA_CALLER")]
    pub caller: Option<Address>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Open a new referendum (administrator only)
    Open {
        /// Name of the referendum
        name: String,
    },
    /// Show the number of referendums
    Count,
    /// List referendum summaries
    List {
        /// 0-based start position
        #[arg(long, default_value_t = 0)]
        offset: u64,
        /// Page size (max 100)
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// Cast a ballot
    Vote {
        /// Referendum id
        id: u64,
        /// Candidate address
        candidate: Address,
        /// Attached payment in AGR
        #[arg(long, default_value = "0.01")]
        payment: String,
    },
    /// Show candidates of a referendum in first-vote order
    Candidates {
        /// Referendum id
        id: u64,
    },
    /// Show the vote count of one candidate
    Tally {
        /// Referendum id
        id: u64,
        /// Candidate address
        candidate: Address,
    },
    /// Close a referendum and pay out the winner (administrator only)
    Close {
        /// Referendum id
        id: u64,
    },
    /// Withdraw commission (administrator only)
    Withdraw {
        /// Recipient address
        recipient: Address,
        /// Amount in AGR; 0 withdraws everything
        #[arg(long, default_value = "0")]
        amount: String,
    },
    /// Query node health
    Health,
}

#[derive(Debug, Deserialize)]
struct SummaryDto {
    id: u64,
    name: String,
    ended: bool,
    candidate_count: usize,
    collected: String,
}

#[derive(Debug, Deserialize)]
struct CloseReceipt {
    winner: Address,
    payout: String,
    commission: String,
}

#[derive(Debug, Deserialize)]
struct WithdrawReceipt {
    recipient: Address,
    amount: String,
}

/// Execute a command.
pub async fn execute(command: Commands, rpc: String, caller: Option<Address>) -> anyhow::Result<()> {
    let client = RpcClient::new(rpc);

    match command {
        Commands::Open { name } => {
            let caller = require_caller(caller)?;
            let id: u64 = client
                .call("agora_openReferendum", json!({ "name": name, "caller": caller }))
                .await?;
            print_success(&format!("referendum {} opened: {}", id, name));
        }

        Commands::Count => {
            let count: u64 = client.call("agora_referendumCount", json!({})).await?;
            println!("{}", count);
        }

        Commands::List { offset, limit } => {
            let page: Vec<SummaryDto> = client
                .call(
                    "agora_listReferendums",
                    json!({ "offset": offset, "limit": limit }),
                )
                .await?;
            print_heading(&format!("{} referendum(s)", page.len()));
            for summary in page {
                let state = if summary.ended {
                    "ended".red()
                } else {
                    "open".green()
                };
                println!(
                    "  #{:<4} {:<24} {:>6}  {} candidate(s), {} {} collected",
                    summary.id,
                    summary.name,
                    state,
                    summary.candidate_count,
                    summary.collected,
                    amount::SYMBOL,
                );
            }
        }

        Commands::Vote {
            id,
            candidate,
            payment,
        } => {
            let caller = require_caller(caller)?;
            // Validate locally before putting it on the wire.
            amount::parse_amount(&payment).context("invalid --payment")?;
            client
                .call::<()>(
                    "agora_castVote",
                    json!({
                        "id": id,
                        "candidate": candidate,
                        "payment": payment,
                        "caller": caller,
                    }),
                )
                .await?;
            print_success(&format!("vote recorded in referendum {}", id));
        }

        Commands::Candidates { id } => {
            let candidates: Vec<Address> = client
                .call("agora_candidates", json!({ "id": id }))
                .await?;
            print_heading(&format!("{} candidate(s)", candidates.len()));
            for (rank, candidate) in candidates.iter().enumerate() {
                println!("  {:>3}. {}", rank + 1, candidate);
            }
        }

        Commands::Tally { id, candidate } => {
            let count: u64 = client
                .call("agora_voteCount", json!({ "id": id, "candidate": candidate }))
                .await?;
            println!("{}", count);
        }

        Commands::Close { id } => {
            let caller = require_caller(caller)?;
            let receipt: CloseReceipt = client
                .call("agora_closeReferendum", json!({ "id": id, "caller": caller }))
                .await?;
            print_success(&format!("referendum {} closed", id));
            print_field("winner", receipt.winner);
            print_field("payout", format!("{} {}", receipt.payout, amount::SYMBOL));
            print_field(
                "commission",
                format!("{} {}", receipt.commission, amount::SYMBOL),
            );
        }

        Commands::Withdraw { recipient, amount } => {
            let caller = require_caller(caller)?;
            amount::parse_amount(&amount).context("invalid --amount")?;
            let receipt: WithdrawReceipt = client
                .call(
                    "agora_withdraw",
                    json!({ "recipient": recipient, "amount": amount, "caller": caller }),
                )
                .await?;
            print_success(&format!(
                "withdrew {} {} to {}",
                receipt.amount,
                amount::SYMBOL,
                receipt.recipient
            ));
        }

        Commands::Health => {
            let health: serde_json::Value = client.call("agora_health", json!({})).await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}

fn require_caller(caller: Option<Address>) -> anyhow::Result<Address> {
    caller.context("this command needs --caller (or AGORA_CALLER)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_vote() {
        let cli = Cli::try_parse_from([
            "agora",
            "--caller",
            "0x0101010101010101010101010101010101010101",
            "vote",
            "3",
            "0x0202020202020202020202020202020202020202",
            "--payment",
            "0.02",
        ])
        .unwrap();
        assert!(cli.caller.is_some());
        match cli.command {
            Commands::Vote { id, payment, .. } => {
                assert_eq!(id, 3);
                assert_eq!(payment, "0.02");
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_require_caller() {
        assert!(require_caller(None).is_err());
    }
}
