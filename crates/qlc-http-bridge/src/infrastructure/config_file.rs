//! Optional TOML configuration file.
//!
//! The bridge runs without any file; `--config <path>` (or
//! `QLCPLUS_BRIDGE_CONFIG`) points it at one.  Every key is optional, and a
//! value given on the command line or in the environment wins over the file.
//!
//! ```toml
//! [bridge]
//! qlcplus = "192.168.1.20:9999"
//! http = "0.0.0.0:8888"
//! timeout_secs = 5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::config::BridgeConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// A file system I/O error occurred.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level layout of the configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub bridge: BridgeSection,
}

/// The `[bridge]` table.  Absent keys leave the built-in default in place.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    /// `host:port` of the QLC+ web server.
    #[serde(default)]
    pub qlcplus: Option<String>,
    /// `host:port` for the HTTP API.
    #[serde(default)]
    pub http: Option<String>,
    /// Exchange deadline in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Overlays the values present in the file onto `base`.
    pub fn apply_to(&self, mut base: BridgeConfig) -> BridgeConfig {
        if let Some(addr) = &self.bridge.qlcplus {
            base.controller_addr = addr.clone();
        }
        if let Some(addr) = &self.bridge.http {
            base.http_bind_addr = addr.clone();
        }
        if let Some(secs) = self.bridge.timeout_secs {
            base.exchange_timeout = Duration::from_secs(secs);
        }
        base
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> Result<ConfigFile, ConfigFileError> {
    Ok(toml::from_str(text)?)
}

/// Reads and parses the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
