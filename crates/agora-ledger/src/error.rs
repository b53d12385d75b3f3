use agora_types::{Amount, Timestamp};
use thiserror::Error;

/// Errors that can occur in ledger operations.
///
/// Every error aborts the whole operation; no partial mutation is ever
/// committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Caller is not the administrator")]
    Unauthorized,

    #[error("Wrong referendum id: {0}")]
    ReferendumNotFound(u64),

    #[error("Candidate must not be the zero address")]
    InvalidCandidate,

    #[error("Recipient must not be the zero address")]
    InvalidRecipient,

    #[error("Casting a vote costs {required}, payment was {provided}")]
    InsufficientPayment { required: Amount, provided: Amount },

    #[error("Voter already voted in this referendum")]
    AlreadyVoted,

    #[error("Referendum already ended")]
    ReferendumEnded,

    #[error("Referendum is time-locked until {unlocks_at}, now is {now}")]
    TimeLocked { unlocks_at: Timestamp, now: Timestamp },

    #[error("No one cast a vote in this referendum")]
    NoVotes,

    #[error("Two or more leading candidates, cannot close")]
    TiedResult,

    #[error("Amount {requested} exceeds available commission balance {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("Offset {offset} exceeds total {total}")]
    OffsetOutOfRange { offset: u64, total: u64 },

    #[error("Page size {limit} exceeds maximum {max}")]
    PageTooLarge { limit: u64, max: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::ReferendumNotFound(7);
        assert!(err.to_string().contains('7'));

        let err = LedgerError::InsufficientPayment {
            required: 100,
            provided: 99,
        };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("99"));
    }
}
