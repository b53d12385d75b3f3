//! Agora Types - Core type definitions for the AGORA referendum ledger.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Addresses (20-byte, Bech32m encoded)
//! - Amounts (u128 atto-AGR, 18 decimals)
//! - Timestamps (unix seconds)

pub mod address;
pub mod amount;
pub mod error;

pub use address::Address;
pub use amount::{format_amount, parse_amount, Amount, DECIMALS, SYMBOL};
pub use error::TypesError;

/// Unix timestamp in seconds. Time is always an explicit input to the
/// ledger, never read from a background clock.
pub type Timestamp = u64;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, Amount, Timestamp, TypesError};
}
