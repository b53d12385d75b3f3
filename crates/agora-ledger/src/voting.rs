//! Ballot admission and tally queries.
//!
//! The only place ballots are recorded. Candidate order is fixed by the
//! time each address first receives a vote, which keeps enumeration
//! stable while a referendum is in progress.

use crate::error::LedgerError;
use crate::registry::Registry;
use agora_types::{Address, Amount, Timestamp};

/// Vote admission over the shared referendum collection.
#[derive(Debug, Clone)]
pub struct VotingLedger {
    vote_cost: Amount,
}

impl VotingLedger {
    pub fn new(vote_cost: Amount) -> Self {
        Self { vote_cost }
    }

    pub fn vote_cost(&self) -> Amount {
        self.vote_cost
    }

    /// Cast a single ballot for `candidate` in referendum `id`.
    ///
    /// Validation order: unknown id, zero-address candidate, payment below
    /// fee, referendum already ended, voter already voted. Overpayment is
    /// accepted and the full payment joins the pot.
    pub fn cast_vote(
        &self,
        registry: &mut Registry,
        id: u64,
        candidate: Address,
        payment: Amount,
        voter: Address,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let referendum = registry.get_mut(id)?;

        if candidate.is_zero() {
            return Err(LedgerError::InvalidCandidate);
        }
        if payment < self.vote_cost {
            return Err(LedgerError::InsufficientPayment {
                required: self.vote_cost,
                provided: payment,
            });
        }
        if referendum.ended {
            return Err(LedgerError::ReferendumEnded);
        }
        if referendum.has_voted(&voter) {
            return Err(LedgerError::AlreadyVoted);
        }

        referendum.record_vote(candidate, voter, payment);
        tracing::debug!(id, candidate = %candidate, voter = %voter, payment, now, "vote cast");
        Ok(())
    }

    /// Candidates of referendum `id` in first-vote order.
    pub fn candidates_of<'a>(
        &self,
        registry: &'a Registry,
        id: u64,
    ) -> Result<&'a [Address], LedgerError> {
        Ok(registry.get(id)?.candidates())
    }

    /// Vote count of `candidate` in referendum `id`; 0 if the address
    /// never received a vote there.
    pub fn vote_count_of(
        &self,
        registry: &Registry,
        id: u64,
        candidate: &Address,
    ) -> Result<u64, LedgerError> {
        Ok(registry.get(id)?.vote_count(candidate))
    }
}
