//! JSON-RPC method handlers.
//!
//! Each handler takes the request DTO, acquires the ledger lock and
//! delegates to the corresponding ledger operation. Mutating calls take
//! the write lock (one writer at a time, matching the ledger's atomic
//! step model); read queries share the read lock. The boundary supplies
//! the timestamp; caller identity arrives pre-verified in the request.

use crate::error::ledger_error_object;
use agora_ledger::{Ledger, ReferendumSummary};
use agora_types::{amount, Address, Amount, Timestamp};
use jsonrpsee::types::error::ErrorObjectOwned;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Shared state behind the RPC surface.
#[derive(Clone)]
pub struct ApiContext {
    ledger: Arc<RwLock<Ledger>>,
    started_at: Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenParams {
    pub name: String,
    pub caller: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub offset: u64,
    pub limit: u64,
}

/// Referendum summary as it crosses the wire. Amounts are decimal AGR
/// strings since u128 does not fit in a JSON number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDto {
    pub id: u64,
    pub name: String,
    pub opened_at: Timestamp,
    pub ended: bool,
    pub candidate_count: usize,
    #[serde(with = "amount::serde_string")]
    pub collected: Amount,
}

impl From<ReferendumSummary> for SummaryDto {
    fn from(s: ReferendumSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            opened_at: s.opened_at,
            ended: s.ended,
            candidate_count: s.candidate_count,
            collected: s.collected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteParams {
    pub id: u64,
    pub candidate: Address,
    #[serde(with = "amount::serde_string")]
    pub payment: Amount,
    pub caller: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferendumParams {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteCountParams {
    pub id: u64,
    pub candidate: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseParams {
    pub id: u64,
    pub caller: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseReceipt {
    pub winner: Address,
    #[serde(with = "amount::serde_string")]
    pub payout: Amount,
    #[serde(with = "amount::serde_string")]
    pub commission: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawParams {
    pub recipient: Address,
    /// "0" withdraws the entire commission balance.
    #[serde(with = "amount::serde_string")]
    pub amount: Amount,
    pub caller: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    pub recipient: Address,
    #[serde(with = "amount::serde_string")]
    pub amount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub uptime_secs: u64,
    pub referendums: u64,
    #[serde(with = "amount::serde_string")]
    pub commission_balance: Amount,
    pub administrator: Address,
}

impl ApiContext {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            started_at: Instant::now(),
        }
    }

    pub fn ledger(&self) -> &Arc<RwLock<Ledger>> {
        &self.ledger
    }

    /// Wall-clock timestamp attached to incoming calls.
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn open(&self, params: OpenParams) -> Result<u64, ErrorObjectOwned> {
        let now = self.now();
        self.ledger
            .write()
            .open(params.name, params.caller, now)
            .map_err(ledger_error_object)
    }

    pub fn count(&self) -> Result<u64, ErrorObjectOwned> {
        Ok(self.ledger.read().count())
    }

    pub fn list(&self, params: ListParams) -> Result<Vec<SummaryDto>, ErrorObjectOwned> {
        self.ledger
            .read()
            .list(params.offset, params.limit)
            .map(|page| page.into_iter().map(SummaryDto::from).collect())
            .map_err(ledger_error_object)
    }

    pub fn cast_vote(&self, params: VoteParams) -> Result<(), ErrorObjectOwned> {
        let now = self.now();
        self.ledger
            .write()
            .cast_vote(params.id, params.candidate, params.payment, params.caller, now)
            .map_err(ledger_error_object)
    }

    pub fn candidates(&self, params: ReferendumParams) -> Result<Vec<Address>, ErrorObjectOwned> {
        self.ledger
            .read()
            .candidates_of(params.id)
            .map(|c| c.to_vec())
            .map_err(ledger_error_object)
    }

    pub fn vote_count(&self, params: VoteCountParams) -> Result<u64, ErrorObjectOwned> {
        self.ledger
            .read()
            .vote_count_of(params.id, &params.candidate)
            .map_err(ledger_error_object)
    }

    pub fn close(&self, params: CloseParams) -> Result<CloseReceipt, ErrorObjectOwned> {
        let now = self.now();
        let outcome = self
            .ledger
            .write()
            .close(params.id, params.caller, now)
            .map_err(ledger_error_object)?;

        // State is committed; the host executes the payout transfer.
        tracing::info!(
            to = %outcome.transfer.to,
            amount = outcome.transfer.amount,
            "payout transfer due"
        );

        Ok(CloseReceipt {
            winner: outcome.winner,
            payout: outcome.payout,
            commission: outcome.commission,
        })
    }

    pub fn withdraw(&self, params: WithdrawParams) -> Result<WithdrawReceipt, ErrorObjectOwned> {
        let transfer = self
            .ledger
            .write()
            .withdraw(params.recipient, params.amount, params.caller)
            .map_err(ledger_error_object)?;

        tracing::info!(
            to = %transfer.to,
            amount = transfer.amount,
            "commission transfer due"
        );

        Ok(WithdrawReceipt {
            recipient: transfer.to,
            amount: transfer.amount,
        })
    }

    pub fn health(&self) -> Result<Health, ErrorObjectOwned> {
        let ledger = self.ledger.read();
        Ok(Health {
            status: "ok".to_string(),
            uptime_secs: self.started_at.elapsed().as_secs(),
            referendums: ledger.count(),
            commission_balance: ledger.commission_balance(),
            administrator: ledger.administrator(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_ledger::LedgerConfig;
    use crate::error::error_codes;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn ctx() -> ApiContext {
        let ledger = Ledger::new(LedgerConfig {
            administrator: addr(0xad),
            vote_cost: 100,
            lock_duration: 0,
            commission_bps: 1_000,
        })
        .unwrap();
        ApiContext::new(ledger)
    }

    #[test]
    fn test_open_and_count() {
        let ctx = ctx();
        assert_eq!(ctx.count().unwrap(), 0);
        let id = ctx
            .open(OpenParams {
                name: "Test".to_string(),
                caller: addr(0xad),
            })
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(ctx.count().unwrap(), 1);
    }

    #[test]
    fn test_open_unauthorized_code() {
        let ctx = ctx();
        let err = ctx
            .open(OpenParams {
                name: "Test".to_string(),
                caller: addr(1),
            })
            .unwrap_err();
        assert_eq!(err.code(), error_codes::UNAUTHORIZED);
    }

    #[test]
    fn test_vote_close_withdraw_receipts() {
        let ctx = ctx();
        ctx.open(OpenParams {
            name: "Test".to_string(),
            caller: addr(0xad),
        })
        .unwrap();

        for voter in [10u8, 11, 12] {
            ctx.cast_vote(VoteParams {
                id: 1,
                candidate: addr(1),
                payment: 100,
                caller: addr(voter),
            })
            .unwrap();
        }

        assert_eq!(ctx.candidates(ReferendumParams { id: 1 }).unwrap(), vec![addr(1)]);
        assert_eq!(
            ctx.vote_count(VoteCountParams { id: 1, candidate: addr(1) }).unwrap(),
            3
        );

        let receipt = ctx
            .close(CloseParams { id: 1, caller: addr(0xad) })
            .unwrap();
        assert_eq!(receipt.winner, addr(1));
        assert_eq!(receipt.payout, 270);
        assert_eq!(receipt.commission, 30);

        let receipt = ctx
            .withdraw(WithdrawParams {
                recipient: addr(0xad),
                amount: 0,
                caller: addr(0xad),
            })
            .unwrap();
        assert_eq!(receipt.amount, 30);
    }

    #[test]
    fn test_wire_amounts_are_strings() {
        let receipt = WithdrawReceipt {
            recipient: addr(1),
            amount: amount::ONE / 100,
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["amount"], "0.01");
    }

    #[test]
    fn test_health() {
        let ctx = ctx();
        let health = ctx.health().unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.referendums, 0);
        assert_eq!(health.administrator, addr(0xad));
    }
}
