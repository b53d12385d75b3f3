//! RPC error types and responses.

use agora_ledger::LedgerError;
use jsonrpsee::types::error::ErrorObjectOwned;
use thiserror::Error;

/// JSON-RPC error codes in the server-defined range.
pub mod error_codes {
    /// Generic server error
    pub const SERVER_ERROR: i32 = -32000;
    /// Referendum id unknown
    pub const NOT_FOUND: i32 = -32001;
    /// Caller is not the administrator
    pub const UNAUTHORIZED: i32 = -32002;
    /// Operation rejected by a ledger rule
    pub const REJECTED: i32 = -32003;
    /// Pagination bounds violated
    pub const LIMIT_EXCEEDED: i32 = -32005;
}

/// Server lifecycle errors.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

/// Map a ledger rejection onto a JSON-RPC error object. The message is
/// the ledger error's display text, so the caller sees the specific rule
/// and the offending value.
pub fn ledger_error_object(err: LedgerError) -> ErrorObjectOwned {
    let code = match &err {
        LedgerError::ReferendumNotFound(_) => error_codes::NOT_FOUND,
        LedgerError::Unauthorized => error_codes::UNAUTHORIZED,
        LedgerError::OffsetOutOfRange { .. } | LedgerError::PageTooLarge { .. } => {
            error_codes::LIMIT_EXCEEDED
        }
        LedgerError::InvalidConfig(_) => error_codes::SERVER_ERROR,
        _ => error_codes::REJECTED,
    };
    ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
}
