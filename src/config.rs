//! Server configuration
//!
//! Values come from an optional JSON file; command-line flags are applied
//! on top by the binary. Missing fields take their defaults.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the HTTP listener
    pub listen_addr: String,

    /// Snapshot file location
    pub snapshot_path: PathBuf,

    /// Seconds between periodic snapshots
    pub snapshot_interval_secs: u64,

    /// Milliseconds between expiry sweeps
    pub sweep_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "127.0.0.1:6380".to_string(),
            snapshot_path: PathBuf::from("redis_snapshot.json"),
            snapshot_interval_secs: 30,
            sweep_interval_ms: 1000,
        }
    }
}

impl Config {
    /// Load a configuration file and validate it
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.snapshot_interval_secs > 0,
            "snapshot interval must be at least one second"
        );
        ensure!(
            self.sweep_interval_ms > 0,
            "sweep interval must be at least one millisecond"
        );
        self.listen_socket()?;
        Ok(())
    }

    pub fn listen_socket(&self) -> anyhow::Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("invalid listen address '{}'", self.listen_addr))
    }

    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_interval_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}
