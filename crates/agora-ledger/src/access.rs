//! Administrator access check.
//!
//! A stateless predicate over the single administrator identity fixed at
//! construction. Consulted synchronously by `open`, `close` and
//! `withdraw`; never cached.

use crate::error::LedgerError;
use agora_types::Address;

/// Guard over privileged operations.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    administrator: Address,
}

impl AccessGuard {
    pub fn new(administrator: Address) -> Self {
        Self { administrator }
    }

    pub fn administrator(&self) -> Address {
        self.administrator
    }

    pub fn is_administrator(&self, caller: &Address) -> bool {
        *caller == self.administrator
    }

    /// Fail with `Unauthorized` unless the caller is the administrator.
    pub fn ensure_administrator(&self, caller: &Address) -> Result<(), LedgerError> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized)
        }
    }
}
