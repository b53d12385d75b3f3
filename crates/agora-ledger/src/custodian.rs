//! Fund custody: payouts at close and the commission balance.
//!
//! The only component that moves value. State is fully committed before a
//! `Transfer` is handed back to the caller, so a reentrant call can never
//! observe a referendum that still accepts mutation after its payout was
//! decided.

use crate::access::AccessGuard;
use crate::error::LedgerError;
use crate::referendum::Referendum;
use crate::registry::Registry;
use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// A value movement decided by the ledger and executed by the host,
/// strictly after the owning operation has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub to: Address,
    pub amount: Amount,
}

/// Result of a successful close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub winner: Address,
    pub payout: Amount,
    pub commission: Amount,
    /// Payout transfer to the winner.
    pub transfer: Transfer,
}

/// Custodian of the pot split and the administrator's commission.
#[derive(Debug, Clone)]
pub struct FundCustodian {
    lock_duration: Timestamp,
    commission_bps: u16,
    commission_balance: Amount,
}

impl FundCustodian {
    pub fn new(lock_duration: Timestamp, commission_bps: u16) -> Self {
        Self {
            lock_duration,
            commission_bps,
            commission_balance: 0,
        }
    }

    pub(crate) fn with_balance(
        lock_duration: Timestamp,
        commission_bps: u16,
        commission_balance: Amount,
    ) -> Self {
        Self {
            lock_duration,
            commission_bps,
            commission_balance,
        }
    }

    /// Commission owed to the administrator and not yet withdrawn.
    pub fn commission_balance(&self) -> Amount {
        self.commission_balance
    }

    /// Close referendum `id`, paying the plurality winner and retaining
    /// the commission. Administrator only; fails before the lock duration
    /// elapses, with no votes, or with a tied lead.
    pub fn close(
        &mut self,
        guard: &AccessGuard,
        registry: &mut Registry,
        id: u64,
        caller: Address,
        now: Timestamp,
    ) -> Result<CloseOutcome, LedgerError> {
        guard.ensure_administrator(&caller)?;

        let referendum = registry.get_mut(id)?;
        if referendum.ended {
            return Err(LedgerError::ReferendumEnded);
        }

        let unlocks_at = referendum.opened_at.saturating_add(self.lock_duration);
        if now < unlocks_at {
            return Err(LedgerError::TimeLocked { unlocks_at, now });
        }

        let winner = plurality_winner(referendum)?;

        let collected = referendum.collected;
        let commission = commission_of(collected, self.commission_bps);
        let payout = collected - commission;

        // Commit all effects before surfacing the transfer.
        referendum.ended = true;
        self.commission_balance = self.commission_balance.saturating_add(commission);

        tracing::info!(
            id,
            winner = %winner,
            payout,
            commission,
            "referendum closed"
        );

        Ok(CloseOutcome {
            winner,
            payout,
            commission,
            transfer: Transfer {
                to: winner,
                amount: payout,
            },
        })
    }

    /// Withdraw commission to `recipient`. Administrator only. An amount
    /// of 0 withdraws the entire balance.
    pub fn withdraw(
        &mut self,
        guard: &AccessGuard,
        recipient: Address,
        amount: Amount,
        caller: Address,
    ) -> Result<Transfer, LedgerError> {
        guard.ensure_administrator(&caller)?;

        if recipient.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let actual = if amount == 0 {
            self.commission_balance
        } else {
            if amount > self.commission_balance {
                return Err(LedgerError::InsufficientFunds {
                    requested: amount,
                    available: self.commission_balance,
                });
            }
            amount
        };

        // Decrement before the transfer leaves the ledger.
        self.commission_balance -= actual;

        tracing::info!(recipient = %recipient, amount = actual, "commission withdrawn");

        Ok(Transfer {
            to: recipient,
            amount: actual,
        })
    }
}

/// The single candidate with strictly the highest vote count, in
/// first-vote order. Fails on an empty candidate list or a shared lead.
fn plurality_winner(referendum: &Referendum) -> Result<Address, LedgerError> {
    let mut best: Option<(Address, u64)> = None;
    let mut leaders = 0usize;

    for candidate in referendum.candidates() {
        let count = referendum.vote_count(candidate);
        match best {
            None => {
                best = Some((*candidate, count));
                leaders = 1;
            }
            Some((_, max)) if count > max => {
                best = Some((*candidate, count));
                leaders = 1;
            }
            Some((_, max)) if count == max => leaders += 1,
            Some(_) => {}
        }
    }

    match best {
        None => Err(LedgerError::NoVotes),
        Some(_) if leaders > 1 => Err(LedgerError::TiedResult),
        Some((winner, _)) => Ok(winner),
    }
}

/// Floor of `collected * bps / 10_000` without intermediate overflow.
fn commission_of(collected: Amount, bps: u16) -> Amount {
    let bps = bps as Amount;
    (collected / 10_000) * bps + (collected % 10_000) * bps / 10_000
}
