//! The referendum record.
//!
//! A referendum is created by the registry, mutated by the voting ledger
//! and the fund custodian, and never deleted. Once `ended` is set the
//! record is frozen.

use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One named vote with its own candidate list, tally and pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referendum {
    /// Sequential id, assigned starting at 1, never reused.
    pub id: u64,
    /// Immutable display name.
    pub name: String,
    /// Creation time.
    pub opened_at: Timestamp,
    /// Terminal flag; the only transition is `false -> true` at close.
    pub ended: bool,
    /// Candidates in the order each first received a vote. Append-only;
    /// the rank of a candidate is fixed for the life of the referendum.
    candidates: Vec<Address>,
    /// Vote tally per candidate. Keys are exactly the candidates.
    vote_counts: HashMap<Address, u64>,
    /// Addresses that already cast a ballot. Membership is permanent.
    voters: HashSet<Address>,
    /// Total value paid in by voters.
    pub collected: Amount,
}

impl Referendum {
    pub fn new(id: u64, name: String, opened_at: Timestamp) -> Self {
        Self {
            id,
            name,
            opened_at,
            ended: false,
            candidates: Vec::new(),
            vote_counts: HashMap::new(),
            voters: HashSet::new(),
            collected: 0,
        }
    }

    /// Candidates in first-vote order.
    pub fn candidates(&self) -> &[Address] {
        &self.candidates
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Vote count for a candidate; 0 if the address never received a vote.
    pub fn vote_count(&self, candidate: &Address) -> u64 {
        self.vote_counts.get(candidate).copied().unwrap_or(0)
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Record an admitted ballot. The caller has already validated the
    /// vote; this only mutates the tally.
    pub(crate) fn record_vote(&mut self, candidate: Address, voter: Address, payment: Amount) {
        if !self.vote_counts.contains_key(&candidate) {
            // First vote for this candidate fixes its rank.
            self.candidates.push(candidate);
        }
        *self.vote_counts.entry(candidate).or_insert(0) += 1;
        self.voters.insert(voter);
        self.collected = self.collected.saturating_add(payment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    #[test]
    fn test_new_referendum_is_empty() {
        let r = Referendum::new(1, "Test".to_string(), 1_000);
        assert_eq!(r.id, 1);
        assert!(!r.ended);
        assert!(r.candidates().is_empty());
        assert_eq!(r.collected, 0);
        assert_eq!(r.vote_count(&addr(1)), 0);
    }

    #[test]
    fn test_candidate_rank_fixed_by_first_vote() {
        let mut r = Referendum::new(1, "Test".to_string(), 0);
        r.record_vote(addr(2), addr(10), 100);
        r.record_vote(addr(1), addr(11), 100);
        // Later votes for an existing candidate do not reorder.
        r.record_vote(addr(1), addr(12), 100);
        r.record_vote(addr(1), addr(13), 100);

        assert_eq!(r.candidates(), &[addr(2), addr(1)]);
        assert_eq!(r.vote_count(&addr(1)), 3);
        assert_eq!(r.vote_count(&addr(2)), 1);
        assert_eq!(r.collected, 400);
        assert_eq!(r.voter_count(), 4);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut r = Referendum::new(3, "Snapshot".to_string(), 42);
        r.record_vote(addr(1), addr(10), 100);
        r.record_vote(addr(2), addr(11), 100);

        let json = serde_json::to_string(&r).unwrap();
        let back: Referendum = serde_json::from_str(&json).unwrap();
        assert_eq!(back.candidates(), r.candidates());
        assert_eq!(back.collected, r.collected);
        assert!(back.has_voted(&addr(10)));
    }
}
