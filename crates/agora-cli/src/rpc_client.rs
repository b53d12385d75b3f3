//! RPC client for CLI operations.
//!
//! HTTP client for making JSON-RPC calls to an agora node.

use serde::{Deserialize, Serialize};

/// RPC client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
}

/// RPC request.
#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

/// RPC response.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// RPC error.
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i32,
    message: String,
}

impl RpcClient {
    /// Create a new RPC client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Make an RPC call.
    pub async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> anyhow::Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        let response = self.client.post(&self.url).json(&request).send().await?;
        let rpc_response: RpcResponse = response.json().await?;

        if let Some(error) = rpc_response.error {
            anyhow::bail!("rejected ({}): {}", error.code, error.message);
        }

        let value = rpc_response.result.unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}
