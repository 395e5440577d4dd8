//! Engine lifecycle: background tasks and shutdown

use super::Engine;
use crate::config::Config;
use crate::expiry::run_sweeper;
use crate::snapshot::run_snapshotter;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// A running engine with its sweeper and snapshotter
pub struct EngineRuntime {
    engine: Arc<Engine>,
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl EngineRuntime {
    /// Open the engine and spawn its background tasks
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &Config) -> Self {
        let engine = Arc::new(Engine::open(config));
        Self::spawn(engine, config)
    }

    /// Spawn the background tasks around an existing engine
    pub fn spawn(engine: Arc<Engine>, config: &Config) -> Self {
        let token = CancellationToken::new();

        let tasks = vec![
            tokio::spawn(run_sweeper(
                engine.clone(),
                config.sweep_interval(),
                token.child_token(),
            )),
            tokio::spawn(run_snapshotter(engine.clone(), token.child_token())),
        ];

        info!(
            "Engine started (snapshot every {:?}, sweep every {:?})",
            config.snapshot_interval(),
            config.sweep_interval()
        );

        EngineRuntime {
            engine,
            token,
            tasks,
        }
    }

    pub fn engine(&self) -> Arc<Engine> {
        self.engine.clone()
    }

    /// Stop the background tasks and write a final snapshot
    pub async fn shutdown(self) {
        info!("Engine shutting down");
        self.token.cancel();
        for task in self.tasks {
            if let Err(e) = task.await {
                error!("Background task ended abnormally: {}", e);
            }
        }

        let engine = self.engine;
        match tokio::task::spawn_blocking(move || engine.save_snapshot()).await {
            Ok(Ok(())) => info!("Final snapshot written"),
            Ok(Err(e)) => error!("Final snapshot failed: {:#}", e),
            Err(e) => error!("Final snapshot task panicked: {}", e),
        }
    }
}
