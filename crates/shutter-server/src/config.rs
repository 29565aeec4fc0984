use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shutter_album::DEFAULT_PAGE_SIZE;

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory committed media objects are written into.
    pub media_root: PathBuf,
    /// Page size applied to fresh listings.
    pub page_size: usize,
    /// Bound of the chunk channel between the upload handler and the
    /// assembler; governs ingress backpressure.
    pub upload_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            media_root: PathBuf::from("photos"),
            page_size: DEFAULT_PAGE_SIZE,
            upload_channel_capacity: 16,
        }
    }
}

impl ServerConfig {
    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
