//! Snapshot persistence
//!
//! The whole database is written as one JSON document. Writes go to
//! `<path>.tmp`, are fsynced, then renamed over `<path>`; a failed save
//! leaves the previous file untouched.

mod format;

pub use format::Snapshot;

use crate::engine::Engine;
use anyhow::Context;
use parking_lot::Mutex;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep_until;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Owns the snapshot file and the save lock
pub struct SnapshotManager {
    path: PathBuf,
    interval: Duration,

    /// Save lock; also records when the last save succeeded
    last_saved: Mutex<Instant>,
}

impl SnapshotManager {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        SnapshotManager {
            path: path.into(),
            interval,
            last_saved: Mutex::new(Instant::now()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read the snapshot file
    ///
    /// A missing file is not an error and yields `None`.
    pub fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read snapshot {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("malformed snapshot {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Capture and persist a snapshot
    ///
    /// The save lock is taken before `capture` runs, so a copy taken
    /// earlier can never be written over a newer one.
    pub fn save_with<F>(&self, capture: F) -> anyhow::Result<()>
    where
        F: FnOnce() -> Snapshot,
    {
        let mut last_saved = self.last_saved.lock();
        let snapshot = capture();
        self.write(&snapshot)?;
        *last_saved = Instant::now();
        info!(
            "Snapshot saved to {} ({} keys, {} sorted sets)",
            self.path.display(),
            snapshot.data.len(),
            snapshot.sorted_sets.len()
        );
        Ok(())
    }

    /// Whether at least one interval has passed since the last save
    pub fn is_due(&self) -> bool {
        self.last_saved.lock().elapsed() >= self.interval
    }

    /// When the next periodic save becomes due
    pub fn next_due(&self) -> Instant {
        *self.last_saved.lock() + self.interval
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp: OsString = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn write(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let tmp = self.tmp_path();
        let result = write_synced(&tmp, snapshot).and_then(|()| {
            fs::rename(&tmp, &self.path)
                .with_context(|| format!("failed to rename {} into place", tmp.display()))
        });

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn write_synced(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, snapshot).context("failed to encode snapshot")?;
    writer.flush()?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
        .with_context(|| format!("failed to sync {}", path.display()))?;
    Ok(())
}

/// Background snapshotter
///
/// Sleeps until one interval after the last successful save, then saves.
/// A save made meanwhile (e.g. by `flushAll`) pushes the wakeup back. A
/// failed save is logged and retried one interval later; the loop keeps
/// going until `token` is cancelled.
pub async fn run_snapshotter(engine: Arc<Engine>, token: CancellationToken) {
    let period = engine.snapshots().interval();
    let mut last_attempt = Instant::now();

    loop {
        let wake = engine.snapshots().next_due().max(last_attempt + period);

        tokio::select! {
            _ = token.cancelled() => {
                debug!("Snapshotter stopping");
                break;
            }
            _ = sleep_until(wake.into()) => {
                if !engine.snapshots().is_due() {
                    continue;
                }
                last_attempt = Instant::now();
                let engine = engine.clone();
                match tokio::task::spawn_blocking(move || engine.save_snapshot()).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => error!("Periodic snapshot failed: {:#}", e),
                    Err(e) => error!("Snapshot task panicked: {}", e),
                }
            }
        }
    }
}
