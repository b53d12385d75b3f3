//! Node configuration.
//!
//! Handles loading and validation of node configuration from a TOML
//! config file plus command-line overrides.

use agora_ledger::LedgerConfig;
use agora_rpc::RpcServerConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node name
    pub name: String,
    /// Where the ledger snapshot is persisted
    pub state_file: PathBuf,
    /// Ledger parameters
    pub ledger: LedgerConfig,
    /// RPC configuration
    pub rpc: RpcConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "agora-node".to_string(),
            state_file: PathBuf::from("./data/ledger.json"),
            ledger: LedgerConfig::default(),
            rpc: RpcConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// RPC listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub listen_addr: SocketAddr,
    pub max_body_size: u32,
    pub max_connections: u32,
}

impl Default for RpcConfig {
    fn default() -> Self {
        let base = RpcServerConfig::default();
        Self {
            listen_addr: base.listen_addr,
            max_body_size: base.max_body_size,
            max_connections: base.max_connections,
        }
    }
}

impl From<RpcConfig> for RpcServerConfig {
    fn from(c: RpcConfig) -> Self {
        Self {
            listen_addr: c.listen_addr,
            max_body_size: c.max_body_size,
            max_connections: c.max_connections,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "agora_ledger=debug"
    pub level: String,
    /// JSON output for production
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl NodeConfig {
    /// Load configuration from file.
    /// Path is validated to prevent directory traversal.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let path_str = path.to_string_lossy();
        if path_str.contains("..") {
            anyhow::bail!("Invalid path: directory traversal detected");
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: NodeConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let path_str = path.to_string_lossy();
        if path_str.contains("..") {
            anyhow::bail!("Invalid path: directory traversal detected");
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.is_empty() {
            anyhow::bail!("node name must not be empty");
        }
        self.ledger
            .validate()
            .map_err(|e| anyhow::anyhow!("ledger config: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::{amount, Address};

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.ledger.vote_cost, amount::ONE / 100);
        assert_eq!(config.rpc.listen_addr.port(), 8640);
        // Default has no administrator yet.
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = NodeConfig::default();
        config.ledger.administrator = Address::from_bytes([7u8; 20]);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        // Amounts are decimal strings in the file.
        assert!(toml_str.contains("vote_cost = \"0.01\""));

        let back: NodeConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.ledger.administrator, config.ledger.administrator);
        assert_eq!(back.ledger.vote_cost, config.ledger.vote_cost);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: NodeConfig = toml::from_str(
            r#"
            [ledger]
            administrator = "0x0707070707070707070707070707070707070707"
            "#,
        )
        .unwrap();
        assert_eq!(config.name, "agora-node");
        assert_eq!(config.ledger.administrator, Address::from_bytes([7u8; 20]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.toml");

        let mut config = NodeConfig::default();
        config.ledger.administrator = Address::from_bytes([7u8; 20]);
        config.to_file(&path).unwrap();

        let back = NodeConfig::from_file(&path).unwrap();
        assert_eq!(back.ledger.administrator, config.ledger.administrator);
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(NodeConfig::from_file(Path::new("../evil.toml")).is_err());
    }
}
