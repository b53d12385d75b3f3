//! Referendum registry.
//!
//! Owns the ordered collection of referendums and issues sequential ids;
//! the only creator of new referendums.

use crate::access::AccessGuard;
use crate::error::LedgerError;
use crate::referendum::Referendum;
use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Hard cap on `list` page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Stable subset of a referendum returned by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferendumSummary {
    pub id: u64,
    pub name: String,
    pub opened_at: Timestamp,
    pub ended: bool,
    pub candidate_count: usize,
    pub collected: Amount,
}

impl From<&Referendum> for ReferendumSummary {
    fn from(r: &Referendum) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            opened_at: r.opened_at,
            ended: r.ended,
            candidate_count: r.candidate_count(),
            collected: r.collected,
        }
    }
}

/// The collection of referendums, indexed by id.
///
/// Ids are exactly `1..=count`, contiguous, never reused: referendum `id`
/// lives at `referendums[id - 1]`.
#[derive(Debug, Default)]
pub struct Registry {
    referendums: Vec<Referendum>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            referendums: Vec::new(),
        }
    }

    /// Restore from a snapshot of the referendum sequence.
    pub(crate) fn from_referendums(referendums: Vec<Referendum>) -> Self {
        Self { referendums }
    }

    pub(crate) fn referendums(&self) -> &[Referendum] {
        &self.referendums
    }

    /// Open a new referendum. Administrator only.
    pub fn open(
        &mut self,
        guard: &AccessGuard,
        caller: Address,
        name: String,
        now: Timestamp,
    ) -> Result<u64, LedgerError> {
        guard.ensure_administrator(&caller)?;

        let id = self.referendums.len() as u64 + 1;
        self.referendums.push(Referendum::new(id, name, now));

        tracing::info!(id, now, "referendum opened");
        Ok(id)
    }

    /// Current number of referendums.
    pub fn count(&self) -> u64 {
        self.referendums.len() as u64
    }

    pub fn get(&self, id: u64) -> Result<&Referendum, LedgerError> {
        if id == 0 || id > self.count() {
            return Err(LedgerError::ReferendumNotFound(id));
        }
        Ok(&self.referendums[(id - 1) as usize])
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Referendum, LedgerError> {
        if id == 0 || id > self.count() {
            return Err(LedgerError::ReferendumNotFound(id));
        }
        Ok(&mut self.referendums[(id - 1) as usize])
    }

    /// List up to `limit` referendum summaries starting at `offset`
    /// (0-based), in id order.
    pub fn list(&self, offset: u64, limit: u64) -> Result<Vec<ReferendumSummary>, LedgerError> {
        let total = self.count();
        if offset > total {
            return Err(LedgerError::OffsetOutOfRange { offset, total });
        }
        if limit > MAX_PAGE_SIZE {
            return Err(LedgerError::PageTooLarge {
                limit,
                max: MAX_PAGE_SIZE,
            });
        }

        let start = offset as usize;
        let end = (offset.saturating_add(limit)).min(total) as usize;
        Ok(self.referendums[start..end]
            .iter()
            .map(ReferendumSummary::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn registry_with(names: &[&str]) -> (Registry, AccessGuard) {
        let guard = AccessGuard::new(addr(0xad));
        let mut registry = Registry::new();
        for (i, name) in names.iter().enumerate() {
            registry
                .open(&guard, addr(0xad), name.to_string(), i as u64)
                .unwrap();
        }
        (registry, guard)
    }

    #[test]
    fn test_sequential_ids() {
        let (mut registry, guard) = registry_with(&["Test", "Hello"]);
        assert_eq!(registry.count(), 2);

        let id = registry
            .open(&guard, addr(0xad), "Third".to_string(), 10)
            .unwrap();
        assert_eq!(id, 3);
        assert_eq!(registry.get(3).unwrap().name, "Third");
    }

    #[test]
    fn test_open_by_stranger_is_prohibited() {
        let (mut registry, guard) = registry_with(&[]);
        let err = registry
            .open(&guard, addr(1), "Test".to_string(), 0)
            .unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_get_rejects_bad_ids() {
        let (registry, _) = registry_with(&["Test"]);
        assert_eq!(
            registry.get(0).unwrap_err(),
            LedgerError::ReferendumNotFound(0)
        );
        assert_eq!(
            registry.get(2).unwrap_err(),
            LedgerError::ReferendumNotFound(2)
        );
        assert!(registry.get(1).is_ok());
    }

    #[test]
    fn test_list_pagination() {
        let (registry, _) = registry_with(&["Test", "Hello", "Third"]);

        let page = registry.list(0, 10).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[1].id, 2);
        assert_eq!(page[1].name, "Hello");

        let page = registry.list(2, 10).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 3);

        // Offset equal to the total returns an empty page.
        assert!(registry.list(3, 10).unwrap().is_empty());
    }

    #[test]
    fn test_list_bounds() {
        let (registry, _) = registry_with(&["Test", "Hello", "Third"]);

        assert_eq!(
            registry.list(4, 10).unwrap_err(),
            LedgerError::OffsetOutOfRange { offset: 4, total: 3 }
        );
        assert_eq!(
            registry.list(0, 150).unwrap_err(),
            LedgerError::PageTooLarge { limit: 150, max: 100 }
        );
    }
}
