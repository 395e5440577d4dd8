//! Background expiry sweeper
//!
//! Reads already expire keys lazily; the sweeper reclaims keys nobody
//! touches any more.

use crate::engine::Engine;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Remove expired keys every `period` until `token` is cancelled
///
/// A failed iteration is logged and the next one runs as usual.
pub async fn run_sweeper(engine: Arc<Engine>, period: Duration, token: CancellationToken) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Expiry sweeper stopping");
                break;
            }
            _ = ticker.tick() => {
                let engine = engine.clone();
                match tokio::task::spawn_blocking(move || engine.purge_expired()).await {
                    Ok(0) => {}
                    Ok(removed) => debug!("Expiry sweep removed {} keys", removed),
                    Err(e) => error!("Expiry sweep failed: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotManager;
    use crate::store::Value;

    #[tokio::test]
    async fn test_sweeper_removes_expired_keys() {
        let engine = Arc::new(Engine::new(SnapshotManager::new(
            "unused.json",
            Duration::from_secs(30),
        )));
        engine.with_db(|db| {
            db.keyspace.set("gone", Value::string("v"), Some(0));
            db.keyspace.set("kept", Value::string("v"), None);
        });

        let token = CancellationToken::new();
        let handle = tokio::spawn(run_sweeper(
            engine.clone(),
            Duration::from_millis(10),
            token.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
        tokio_test::assert_ok!(handle.await);

        assert_eq!(engine.stats().keys, 1);
    }
}
