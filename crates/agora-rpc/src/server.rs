//! RPC server implementation.
//!
//! HTTP JSON-RPC server using jsonrpsee. All ledger operations are
//! registered as `agora_` methods over one shared [`ApiContext`].

use crate::error::RpcError;
use crate::handlers::ApiContext;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;

/// RPC server configuration.
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    /// HTTP server address
    pub listen_addr: SocketAddr,
    /// Max request body size
    pub max_body_size: u32,
    /// Max connections
    pub max_connections: u32,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8640)),
            max_body_size: 1024 * 1024, // 1 MB
            max_connections: 100,
        }
    }
}

/// RPC server.
pub struct RpcServer {
    config: RpcServerConfig,
    ctx: ApiContext,
    handle: Option<ServerHandle>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, ctx: ApiContext) -> Self {
        Self {
            config,
            ctx,
            handle: None,
        }
    }

    /// Start the HTTP server.
    pub async fn start(&mut self) -> Result<SocketAddr, RpcError> {
        let server = Server::builder()
            .max_request_body_size(self.config.max_body_size)
            .max_connections(self.config.max_connections)
            .build(self.config.listen_addr)
            .await
            .map_err(|e| RpcError::InternalError(format!("Failed to build HTTP server: {}", e)))?;

        let addr = server
            .local_addr()
            .map_err(|e| RpcError::InternalError(e.to_string()))?;

        let module = create_rpc_module(self.ctx.clone())?;
        self.handle = Some(server.start(module));

        tracing::info!("HTTP RPC server started on {}", addr);
        Ok(addr)
    }

    /// Stop the RPC server.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.stop() {
                tracing::warn!("RPC server stop failed: {}", e);
            }
        }
        tracing::info!("RPC server stopped");
    }

    /// Check if server is running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

/// Register all ledger operations on one module.
pub fn create_rpc_module(ctx: ApiContext) -> Result<RpcModule<ApiContext>, RpcError> {
    let mut module = RpcModule::new(ctx);

    module
        .register_method("agora_openReferendum", |params, ctx| {
            ctx.open(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_referendumCount", |_params, ctx| ctx.count())
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_listReferendums", |params, ctx| {
            ctx.list(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_castVote", |params, ctx| {
            ctx.cast_vote(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_candidates", |params, ctx| {
            ctx.candidates(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_voteCount", |params, ctx| {
            ctx.vote_count(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_closeReferendum", |params, ctx| {
            ctx.close(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_withdraw", |params, ctx| {
            ctx.withdraw(params.parse()?)
        })
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    module
        .register_method("agora_health", |_params, ctx| ctx.health())
        .map_err(|e| RpcError::InternalError(e.to_string()))?;

    Ok(module)
}
