use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::SessionStore;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Background evictor for expired sessions. Each tick snapshots the ids
/// and removes every session older than the store's TTL. Spawned once per
/// store, stopped via `ReaperHandle::shutdown` during orderly teardown.
pub struct SessionReaper {
    store: Arc<SessionStore>,
    poll_interval: Duration,
}

impl SessionReaper {
    pub fn new(store: Arc<SessionStore>, poll_interval: Duration) -> Self {
        Self {
            store,
            poll_interval,
        }
    }

    /// One eviction pass. The get/remove pair is two separate lock
    /// acquisitions on purpose: a session removed between the snapshot
    /// and the get is skipped, and one recreated in between carries a
    /// fresh timestamp so it survives the age check. Returns the number
    /// of sessions evicted.
    pub fn sweep(&self) -> usize {
        let ttl = self.store.ttl();
        let mut evicted = 0;
        for id in self.store.ids() {
            let session = match self.store.get(&id) {
                Ok(session) => session,
                // Removed concurrently since the snapshot; expected.
                Err(_) => continue,
            };
            if session.is_expired(ttl) {
                self.store.remove(&id);
                evicted += 1;
            }
        }
        if evicted > 0 {
            info!("Reaped {} expired sessions", evicted);
        }
        evicted
    }

    /// Spawn the periodic eviction task on the current runtime.
    pub fn spawn(self) -> ReaperHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        info!("Starting session reaper (poll interval: {:?})", self.poll_interval);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.poll_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.sweep();
                    }
                    _ = stop_rx.changed() => {
                        debug!("Session reaper stopping");
                        break;
                    }
                }
            }
        });

        ReaperHandle {
            stop: stop_tx,
            task,
        }
    }
}

/// Owned handle to the running reaper task.
pub struct ReaperHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signal the reaper to stop and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}
