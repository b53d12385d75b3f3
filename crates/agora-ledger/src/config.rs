//! Ledger configuration.

use crate::error::LedgerError;
use agora_types::{amount, Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Fixed parameters of the ledger, supplied once at construction and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// The single administrator identity. Only this address may open
    /// referendums, close them and withdraw commission.
    pub administrator: Address,
    /// Fee a voter must attach to cast a ballot, in atto-AGR.
    #[serde(with = "amount::serde_string")]
    pub vote_cost: Amount,
    /// Minimum time a referendum must stay open before it can close,
    /// in seconds.
    pub lock_duration: Timestamp,
    /// Commission retained from a closed pot, in basis points
    /// (1000 = 10%).
    pub commission_bps: u16,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            administrator: Address::ZERO,
            vote_cost: amount::ONE / 100,         // 0.01 AGR
            lock_duration: 3 * 24 * 60 * 60,      // three days
            commission_bps: 1_000,                // 10%
        }
    }
}

impl LedgerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.administrator.is_zero() {
            return Err(LedgerError::InvalidConfig(
                "administrator must not be the zero address".to_string(),
            ));
        }
        if self.vote_cost == 0 {
            return Err(LedgerError::InvalidConfig(
                "vote_cost must be positive".to_string(),
            ));
        }
        if self.commission_bps > 10_000 {
            return Err(LedgerError::InvalidConfig(format!(
                "commission_bps {} exceeds 10000",
                self.commission_bps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Address {
        Address::from_bytes([0xadu8; 20])
    }

    #[test]
    fn test_default_rejects_zero_admin() {
        assert!(LedgerConfig::default().validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        let config = LedgerConfig {
            administrator: admin(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.vote_cost, amount::ONE / 100);
        assert_eq!(config.lock_duration, 259_200);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let config = LedgerConfig {
            administrator: admin(),
            vote_cost: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LedgerConfig {
            administrator: admin(),
            commission_bps: 10_001,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
