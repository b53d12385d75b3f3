//! Agora Ledger - referendum voting and escrow core.
//!
//! This crate provides:
//! - Referendum registry with sequential ids and pagination
//! - Ballot admission with fixed entry fee and first-vote candidate order
//! - Pot custody: plurality payout at close, commission withdrawal
//! - Administrator access guard

pub mod access;
pub mod config;
pub mod custodian;
pub mod error;
pub mod ledger;
pub mod referendum;
pub mod registry;
pub mod voting;

pub use access::AccessGuard;
pub use config::LedgerConfig;
pub use custodian::{CloseOutcome, FundCustodian, Transfer};
pub use error::LedgerError;
pub use ledger::{Ledger, LedgerSnapshot};
pub use referendum::Referendum;
pub use registry::{Registry, ReferendumSummary, MAX_PAGE_SIZE};
pub use voting::VotingLedger;
