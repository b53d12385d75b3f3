//! The composed ledger.
//!
//! One facade owning the single shared state: the registry's referendum
//! collection and the custodian's commission balance. Every operation
//! validates, mutates atomically and returns; value transfers are
//! surfaced to the host only after the state is committed. Callers must
//! serialize mutating calls (one exclusive lock around the `Ledger`);
//! time is an explicit input to every time-sensitive operation.

use crate::access::AccessGuard;
use crate::config::LedgerConfig;
use crate::custodian::{CloseOutcome, FundCustodian, Transfer};
use crate::error::LedgerError;
use crate::referendum::Referendum;
use crate::registry::{Registry, ReferendumSummary};
use crate::voting::VotingLedger;
use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Durable state of the ledger. The fields here are the entire persisted
/// layout; configuration is supplied again at restore time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub referendums: Vec<Referendum>,
    pub commission_balance: Amount,
}

/// The referendum/escrow ledger.
#[derive(Debug)]
pub struct Ledger {
    guard: AccessGuard,
    registry: Registry,
    voting: VotingLedger,
    custodian: FundCustodian,
}

impl Ledger {
    /// Build an empty ledger from a validated configuration.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            guard: AccessGuard::new(config.administrator),
            registry: Registry::new(),
            voting: VotingLedger::new(config.vote_cost),
            custodian: FundCustodian::new(config.lock_duration, config.commission_bps),
        })
    }

    /// Rebuild a ledger from a snapshot plus the fixed configuration.
    pub fn restore(config: LedgerConfig, snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            guard: AccessGuard::new(config.administrator),
            registry: Registry::from_referendums(snapshot.referendums),
            voting: VotingLedger::new(config.vote_cost),
            custodian: FundCustodian::with_balance(
                config.lock_duration,
                config.commission_bps,
                snapshot.commission_balance,
            ),
        })
    }

    /// Snapshot the durable state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            referendums: self.registry.referendums().to_vec(),
            commission_balance: self.custodian.commission_balance(),
        }
    }

    pub fn administrator(&self) -> Address {
        self.guard.administrator()
    }

    pub fn vote_cost(&self) -> Amount {
        self.voting.vote_cost()
    }

    pub fn commission_balance(&self) -> Amount {
        self.custodian.commission_balance()
    }

    /// Open a new referendum; administrator only. Returns the new id.
    pub fn open(
        &mut self,
        name: impl Into<String>,
        caller: Address,
        now: Timestamp,
    ) -> Result<u64, LedgerError> {
        self.registry.open(&self.guard, caller, name.into(), now)
    }

    /// Number of referendums.
    pub fn count(&self) -> u64 {
        self.registry.count()
    }

    /// Paginated summaries in id order.
    pub fn list(&self, offset: u64, limit: u64) -> Result<Vec<ReferendumSummary>, LedgerError> {
        self.registry.list(offset, limit)
    }

    /// Cast a ballot. Any caller; requires `payment >= vote_cost`.
    pub fn cast_vote(
        &mut self,
        id: u64,
        candidate: Address,
        payment: Amount,
        voter: Address,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        self.voting
            .cast_vote(&mut self.registry, id, candidate, payment, voter, now)
    }

    /// Candidates of referendum `id` in first-vote order.
    pub fn candidates_of(&self, id: u64) -> Result<&[Address], LedgerError> {
        self.voting.candidates_of(&self.registry, id)
    }

    /// Vote count of `candidate` in referendum `id`.
    pub fn vote_count_of(&self, id: u64, candidate: &Address) -> Result<u64, LedgerError> {
        self.voting.vote_count_of(&self.registry, id, candidate)
    }

    /// Close a referendum; administrator only.
    pub fn close(
        &mut self,
        id: u64,
        caller: Address,
        now: Timestamp,
    ) -> Result<CloseOutcome, LedgerError> {
        self.custodian
            .close(&self.guard, &mut self.registry, id, caller, now)
    }

    /// Withdraw commission; administrator only. `amount == 0` withdraws
    /// the entire balance.
    pub fn withdraw(
        &mut self,
        recipient: Address,
        amount: Amount,
        caller: Address,
    ) -> Result<Transfer, LedgerError> {
        self.custodian.withdraw(&self.guard, recipient, amount, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn admin() -> Address {
        addr(0xad)
    }

    fn config() -> LedgerConfig {
        LedgerConfig {
            administrator: admin(),
            vote_cost: 100,
            lock_duration: 1_000,
            commission_bps: 1_000,
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = LedgerConfig {
            administrator: Address::ZERO,
            ..config()
        };
        assert!(Ledger::new(config).is_err());
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut ledger = Ledger::new(config()).unwrap();
        ledger.open("Test", admin(), 0).unwrap();
        ledger.cast_vote(1, addr(1), 100, addr(10), 1).unwrap();
        ledger.cast_vote(1, addr(1), 100, addr(11), 2).unwrap();
        ledger.close(1, admin(), 1_000).unwrap();
        assert_eq!(ledger.commission_balance(), 20);

        let snapshot = ledger.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let snapshot: LedgerSnapshot = serde_json::from_str(&json).unwrap();

        let restored = Ledger::restore(config(), snapshot).unwrap();
        assert_eq!(restored.count(), 1);
        assert_eq!(restored.commission_balance(), 20);
        assert_eq!(restored.vote_count_of(1, &addr(1)).unwrap(), 2);
        assert!(restored.list(0, 10).unwrap()[0].ended);
    }
}
