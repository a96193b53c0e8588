use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use cask_gateway::GatewayOptions;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Request body cap enforced before the multipart payload is read.
    pub max_upload_bytes: usize,
    /// Bound on lock waits, in milliseconds. Absent means wait forever.
    pub lock_timeout_ms: Option<u64>,
    /// Route deletes through the per-key lock (off by default).
    pub serialized_remove: bool,
    /// Capacity budget for the in-memory store, in gibibytes.
    pub memory_capacity_gib: Option<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9090".parse().unwrap(),
            max_upload_bytes: 64 * 1024 * 1024,
            lock_timeout_ms: None,
            serialized_remove: false,
            memory_capacity_gib: None,
        }
    }
}

impl ServerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The gateway options this config asks for.
    pub fn gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            lock_timeout: self.lock_timeout_ms.map(Duration::from_millis),
            serialized_remove: self.serialized_remove,
        }
    }
}
