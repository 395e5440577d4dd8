use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vaultkv::{web, Config, EngineRuntime};

/// In-memory key-value store with snapshot persistence
#[derive(Debug, Parser)]
#[command(name = "vaultkv", version, about)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(long)]
    listen: Option<String>,

    /// Snapshot file location (overrides the config file)
    #[arg(long)]
    snapshot_path: Option<PathBuf>,

    /// Seconds between snapshots (overrides the config file)
    #[arg(long)]
    snapshot_interval: Option<u64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(listen) = self.listen {
            config.listen_addr = listen;
        }
        if let Some(path) = self.snapshot_path {
            config.snapshot_path = path;
        }
        if let Some(secs) = self.snapshot_interval {
            config.snapshot_interval_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse()
        .into_config()
        .context("invalid configuration")?;
    let addr = config.listen_socket()?;

    info!("VaultKV starting...");
    let runtime = EngineRuntime::start(&config);

    let served = web::run_web_server(addr, runtime.engine(), shutdown_signal()).await;
    if let Err(e) = &served {
        error!("Web server error: {:#}", e);
    }

    runtime.shutdown().await;
    served
}
