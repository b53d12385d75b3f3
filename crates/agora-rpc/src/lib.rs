//! Agora RPC - JSON-RPC boundary for the referendum ledger.
//!
//! Every ledger operation is exposed as an `agora_` method. Calls carry
//! the operation arguments, the (pre-verified) caller address and, for
//! votes, the attached payment; the server supplies the timestamp.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{error_codes, RpcError};
pub use handlers::ApiContext;
pub use server::{create_rpc_module, RpcServer, RpcServerConfig};
